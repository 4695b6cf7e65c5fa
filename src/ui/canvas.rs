// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas.
//!
//! This module renders the document at 1:1 scale on a white page and
//! turns pointer input over the page into canvas-relative events for
//! the editor. It never modifies the document itself.

use crate::models::{Document, Rgba, Shape, ShapeKind};
use std::f32::consts::TAU;

/// Segments used to approximate ellipses.
const ELLIPSE_SEGMENTS: usize = 64;

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasAction {
    Click(i32, i32),
    Press(i32, i32),
    Drag(i32, i32),
    Release(i32, i32),
}

/// Convert a model colour to an egui colour.
pub fn to_color32(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Convert an egui colour to a model colour.
pub fn from_color32(color: egui::Color32) -> Rgba {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba::new(r, g, b, a)
}

/// Display the canvas and collect this frame's pointer events.
pub fn show(ui: &mut egui::Ui, document: Option<&Document>, selected: Option<usize>) -> Vec<CanvasAction> {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::GRAY;

    let Some(document) = document else {
        show_welcome(ui);
        return Vec::new();
    };

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let size = egui::vec2(document.canvas_width() as f32, document.canvas_height() as f32);
            let (page, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

            let painter = ui.painter_at(page);
            painter.rect_filled(page, 0.0, egui::Color32::WHITE);
            for (index, shape) in document.shapes().iter().enumerate() {
                draw_shape(&painter, page.min, shape);
                if selected == Some(index) {
                    draw_selection(&painter, page.min, shape);
                }
            }

            pointer_actions(ui, &response, page)
        })
        .inner
}

fn pointer_actions(ui: &egui::Ui, response: &egui::Response, page: egui::Rect) -> Vec<CanvasAction> {
    let to_canvas = |pos: egui::Pos2| {
        let rel = pos - page.min;
        (rel.x.floor() as i32, rel.y.floor() as i32)
    };
    let pointer = response
        .interact_pointer_pos()
        .or_else(|| ui.input(|i| i.pointer.latest_pos()))
        .unwrap_or(page.min);

    let mut actions = Vec::new();

    if response.clicked() {
        let (x, y) = to_canvas(pointer);
        actions.push(CanvasAction::Click(x, y));
    }

    if response.drag_started() {
        let origin = ui.input(|i| i.pointer.press_origin()).unwrap_or(pointer);
        let (x, y) = to_canvas(origin);
        actions.push(CanvasAction::Press(x, y));
    }

    if response.dragged() {
        let (x, y) = to_canvas(pointer);
        actions.push(CanvasAction::Drag(x, y));
    }

    if response.drag_stopped() {
        let (x, y) = to_canvas(pointer);
        actions.push(CanvasAction::Release(x, y));
    }

    actions
}

fn bounding_rect(origin: egui::Pos2, shape: &Shape) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(shape.x as f32, shape.y as f32),
        egui::vec2(shape.width as f32, shape.height as f32),
    )
}

/// Draw one filled shape.
fn draw_shape(painter: &egui::Painter, origin: egui::Pos2, shape: &Shape) {
    let fill = to_color32(shape.color);
    let rect = bounding_rect(origin, shape);

    match shape.kind {
        ShapeKind::Square => {
            painter.rect_filled(rect, 0.0, fill);
        }
        ShapeKind::Circle => {
            let center = rect.center();
            let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
            let points = (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let t = i as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
                    center + egui::vec2(rx * t.cos(), ry * t.sin())
                })
                .collect();
            painter.add(egui::Shape::convex_polygon(points, fill, egui::Stroke::NONE));
        }
        ShapeKind::Triangle => {
            let points = shape
                .triangle_vertices()
                .iter()
                .map(|&(x, y)| origin + egui::vec2(x as f32, y as f32))
                .collect();
            painter.add(egui::Shape::convex_polygon(points, fill, egui::Stroke::NONE));
        }
    }
}

/// Outline the bounding box of the selected shape.
fn draw_selection(painter: &egui::Painter, origin: egui::Pos2, shape: &Shape) {
    let rect = bounding_rect(origin, shape).expand(2.0);
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.5, egui::Color32::from_rgb(255, 140, 0)),
    );
}

fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Drawing")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Create or open a drawing to begin")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → New... / Open...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_round_trip() {
        let color = Rgba::opaque(12, 200, 7);
        assert_eq!(from_color32(to_color32(color)), color);
    }
}
