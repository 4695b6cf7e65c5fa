// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing data model.

pub mod document;
pub mod shape;

pub use document::{Document, Observer, ObserverId};
pub use shape::{Rgba, Shape, ShapeKind};
