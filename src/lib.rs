// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing - a small vector editor.
//!
//! Documents are fixed-size canvases holding coloured squares, circles
//! and triangles in z-order. The [`editor::Editor`] owns the live
//! document and implements every user command with undo/redo; the
//! egui front end in [`app`] and [`ui`] only renders and forwards input.

pub mod app;
pub mod config;
pub mod editor;
pub mod io;
pub mod models;
pub mod ui;
pub mod util;
