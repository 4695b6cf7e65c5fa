// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! Exactly one tool is active at a time. The colour button sets the fill
//! used by the next insertions; existing shapes keep their colour.

use super::canvas::{from_color32, to_color32};
use crate::editor::Tool;
use crate::models::Rgba;

fn tool_label(tool: Tool) -> &'static str {
    match tool {
        Tool::Select => "⬆ Select",
        Tool::Delete => "✖ Delete",
        Tool::Square => "■ Square",
        Tool::Circle => "● Circle",
        Tool::Triangle => "▲ Triangle",
    }
}

fn tool_hint(tool: Tool) -> &'static str {
    match tool {
        Tool::Select => "Click to select a shape, drag to move it",
        Tool::Delete => "Click a shape to delete it",
        Tool::Square | Tool::Circle | Tool::Triangle => {
            "Click to insert a shape with its corner at the pointer"
        }
    }
}

/// Display the toolbar with tool selection buttons and the fill colour.
pub fn show(ui: &mut egui::Ui, current_tool: &mut Tool, fill_color: &mut Rgba) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        for tool in Tool::ALL {
            if ui.selectable_label(*current_tool == tool, tool_label(tool)).clicked() {
                *current_tool = tool;
            }
        }

        ui.separator();

        let mut color = to_color32(*fill_color);
        if ui
            .color_edit_button_srgba(&mut color)
            .on_hover_text("Fill colour")
            .changed()
        {
            *fill_color = from_color32(color);
        }

        ui.separator();

        ui.label(egui::RichText::new(tool_hint(*current_tool)).italics().weak());
    });
}
