// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Textual view of the document.
//!
//! A floating window listing every shape with its index, kind, position,
//! size and colour. It is a document observer: the listing is rebuilt on
//! each notification, not on each frame.

use crate::models::{Document, Observer};
use std::cell::RefCell;
use std::rc::Rc;

/// Shape list window state.
#[derive(Default)]
pub struct ShapeList {
    text: Rc<RefCell<String>>,
    pub open: bool,
}

impl ShapeList {
    /// Observer that refreshes the listing.
    pub fn observer(&self) -> Observer {
        let text = Rc::clone(&self.text);
        Rc::new(move |document: &Document| {
            *text.borrow_mut() = document.to_string();
        })
    }

    /// Current listing.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Display the window while it is open and a document exists.
    pub fn show(&mut self, ctx: &egui::Context, has_document: bool) {
        if !has_document {
            return;
        }
        let text = self.text.borrow();
        egui::Window::new("Shape list")
            .open(&mut self.open)
            .default_size([300.0, 400.0])
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if text.is_empty() {
                        ui.label(egui::RichText::new("No shapes").weak());
                    } else {
                        ui.monospace(text.as_str());
                    }
                });
            });
    }
}
