// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing - a desktop editor for simple coloured shapes.
//!
//! Usage: `drawing [FILE.drw]`

use anyhow::Result;
use drawing_editor::app::DrawingApp;
use drawing_editor::config::Settings;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let settings = Settings::load_or_default();
    let file = std::env::args_os().nth(1).map(PathBuf::from);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([700.0, 400.0])
            .with_min_inner_size([700.0, 400.0])
            .with_title("Drawing"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Drawing",
        options,
        Box::new(move |cc| Ok(Box::new(DrawingApp::new(cc, settings, file)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
