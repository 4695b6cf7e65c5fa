// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape data structures.
//!
//! This module defines the geometric primitives a drawing is made of:
//! squares, circles and triangles, each described by its bounding box
//! and fill colour.

use crate::util::geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Square, ShapeKind::Circle, ShapeKind::Triangle];

    /// Human readable name used in menus and status messages.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLUE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// A coloured shape placed on the canvas.
///
/// `x`/`y` is the top-left corner of the bounding box. Sizes are unsigned,
/// so a bounding box can never be inverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Rgba,
}

impl Shape {
    /// Create a new shape with the given bounding box and colour.
    pub fn new(kind: ShapeKind, x: i32, y: i32, width: u32, height: u32, color: Rgba) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            color,
        }
    }

    /// Check whether the point lies inside the shape.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        match self.kind {
            ShapeKind::Square => {
                geometry::rect_contains(self.x, self.y, self.width, self.height, px, py)
            }
            ShapeKind::Circle => {
                geometry::ellipse_contains(self.x, self.y, self.width, self.height, px, py)
            }
            ShapeKind::Triangle => geometry::polygon_contains(&self.triangle_vertices(), px, py),
        }
    }

    /// Vertices of the triangle inscribed in the bounding box: apex at
    /// top-centre, base along the bottom edge.
    ///
    /// Widened to `i64`: a box may extend past the `i32` range.
    pub fn triangle_vertices(&self) -> [(i64, i64); 3] {
        let (x, y) = (self.x as i64, self.y as i64);
        let (w, h) = (self.width as i64, self.height as i64);
        [(x + w / 2, y), (x + w, y + h), (x, y + h)]
    }

    /// Move the top-left corner to `(x, y)`.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Shift the shape by the given offset.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.move_to(self.x.saturating_add(dx), self.y.saturating_add(dy));
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({},{}) [W:{},H:{}]->{}",
            self.kind, self.x, self.y, self.width, self.height, self.color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(kind: ShapeKind) -> Shape {
        Shape::new(kind, 100, 100, 50, 50, Rgba::BLUE)
    }

    #[test]
    fn test_square_contains() {
        let s = shape(ShapeKind::Square);
        assert!(s.contains(100, 100));
        assert!(s.contains(149, 149));
        assert!(!s.contains(150, 120));
        assert!(!s.contains(99, 120));
    }

    #[test]
    fn test_circle_excludes_corners() {
        let s = shape(ShapeKind::Circle);
        assert!(s.contains(125, 125));
        assert!(!s.contains(101, 101));
        assert!(!s.contains(148, 148));
    }

    #[test]
    fn test_triangle_vertices_and_contains() {
        let s = shape(ShapeKind::Triangle);
        assert_eq!(s.triangle_vertices(), [(125, 100), (150, 150), (100, 150)]);
        assert!(s.contains(125, 140));
        assert!(!s.contains(102, 102));
        assert!(!s.contains(148, 102));
    }

    #[test]
    fn test_triangle_odd_width_rounds_apex_down() {
        let s = Shape::new(ShapeKind::Triangle, 0, 0, 51, 40, Rgba::BLUE);
        assert_eq!(s.triangle_vertices()[0], (25, 0));
    }

    #[test]
    fn test_triangle_at_edge_of_coordinate_range() {
        let s = Shape::new(ShapeKind::Triangle, i32::MAX - 10, 0, 50, 50, Rgba::BLUE);
        assert_eq!(s.triangle_vertices()[1], (i32::MAX as i64 + 40, 50));
        assert!(s.contains(i32::MAX - 1, 40));
        assert!(!s.contains(5, 5));

        let wide = Shape::new(ShapeKind::Triangle, 0, 0, u32::MAX, 10, Rgba::BLUE);
        assert_eq!(wide.triangle_vertices()[0], (u32::MAX as i64 / 2, 0));
        assert!(!wide.contains(5, 5));
        assert!(wide.contains(i32::MAX, 5));
    }

    #[test]
    fn test_move_keeps_size_and_color() {
        let mut s = shape(ShapeKind::Circle);
        s.move_to(7, -3);
        assert_eq!((s.x, s.y, s.width, s.height), (7, -3, 50, 50));
        assert_eq!(s.color, Rgba::BLUE);
        assert_eq!(s.kind, ShapeKind::Circle);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = shape(ShapeKind::Square);
        let mut copy = original.clone();
        copy.translate(5, 5);
        assert_eq!(original.x, 100);
        assert_eq!(copy.x, 105);
    }

    #[test]
    fn test_display() {
        let s = Shape::new(ShapeKind::Square, 136, 137, 50, 50, Rgba::BLUE);
        assert_eq!(s.to_string(), "SQUARE (136,137) [W:50,H:50]->rgba(0,0,255,255)");
    }
}
