// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Native dialogs and the canvas size prompt.

use crate::editor::{CloseDecision, Dialogs};
use crate::io::serialization::DRAWING_EXTENSION;
use std::path::PathBuf;

/// Dialogs backed by the platform's native file and message dialogs.
#[derive(Default)]
pub struct NativeDialogs;

impl NativeDialogs {
    fn file_dialog() -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new().add_filter("Drawing", &[DRAWING_EXTENSION]);
        match std::env::current_dir() {
            Ok(dir) => dialog.set_directory(dir),
            Err(_) => dialog,
        }
    }
}

impl Dialogs for NativeDialogs {
    fn confirm_close(&mut self) -> CloseDecision {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title("Save required")
            .set_description("Do you want to save the changes before closing the file?")
            .set_buttons(rfd::MessageButtons::YesNoCancel)
            .show();
        match result {
            rfd::MessageDialogResult::Yes => CloseDecision::Save,
            rfd::MessageDialogResult::No => CloseDecision::Discard,
            _ => CloseDecision::Cancel,
        }
    }

    fn choose_open_path(&mut self) -> Option<PathBuf> {
        Self::file_dialog().pick_file()
    }

    fn choose_save_path(&mut self) -> Option<PathBuf> {
        Self::file_dialog().save_file()
    }
}

/// Outcome of a frame of the size prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePromptResult {
    Pending,
    Confirmed { width: u32, height: u32 },
    Cancelled,
}

/// Modal-style window asking for the size of a new document.
pub struct SizePrompt {
    width: u32,
    height: u32,
}

impl SizePrompt {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> SizePromptResult {
        let mut result = SizePromptResult::Pending;

        egui::Window::new("New drawing")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Grid::new("size_prompt").num_columns(2).show(ui, |ui| {
                    ui.label("Width (px):");
                    ui.add(egui::DragValue::new(&mut self.width).clamp_range(1..=10_000));
                    ui.end_row();

                    ui.label("Height (px):");
                    ui.add(egui::DragValue::new(&mut self.height).clamp_range(1..=10_000));
                    ui.end_row();
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        result = SizePromptResult::Confirmed {
                            width: self.width,
                            height: self.height,
                        };
                    }
                    if ui.button("Cancel").clicked() {
                        result = SizePromptResult::Cancelled;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            result = SizePromptResult::Cancelled;
        }

        result
    }
}
