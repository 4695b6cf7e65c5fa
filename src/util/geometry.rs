// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric containment tests.
//!
//! These follow the usual raster toolkit conventions: boxes are
//! inclusive on the top/left edges and exclusive on the bottom/right
//! edges, and polygons use an even-odd crossing count with the same
//! half-open edge rules, so a point on a shared edge belongs to exactly
//! one of two adjacent shapes.

/// Axis-aligned box containment, inclusive-exclusive.
///
/// Empty boxes (zero width or height) contain nothing.
pub fn rect_contains(x: i32, y: i32, width: u32, height: u32, px: i32, py: i32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    let (x, y, px, py) = (x as i64, y as i64, px as i64, py as i64);
    px >= x && py >= y && px < x + width as i64 && py < y + height as i64
}

/// Point-in-ellipse test for the ellipse inscribed in the given box.
pub fn ellipse_contains(x: i32, y: i32, width: u32, height: u32, px: i32, py: i32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    let norm_x = (px as f64 - x as f64) / width as f64 - 0.5;
    let norm_y = (py as f64 - y as f64) / height as f64 - 0.5;
    norm_x * norm_x + norm_y * norm_y < 0.25
}

/// Even-odd point-in-polygon test over integer vertices.
///
/// Vertices are `i64`, so boxes reaching past the `i32` range are fine.
/// Horizontal edges never count as crossings; an edge covers the
/// half-open vertical span `[min_y, max_y)` and only points strictly to
/// the left of it are counted.
pub fn polygon_contains(vertices: &[(i64, i64)], px: i32, py: i32) -> bool {
    if vertices.len() <= 2 || !bounding_box_contains(vertices, px, py) {
        return false;
    }

    let (x, y) = (px as f64, py as f64);
    let mut hits = 0usize;
    let (mut last_x, mut last_y) = vertices[vertices.len() - 1];

    for &(cur_x, cur_y) in vertices {
        let (lx, ly) = (last_x, last_y);
        last_x = cur_x;
        last_y = cur_y;

        if cur_y == ly {
            continue;
        }

        let left_x = if cur_x < lx {
            if x >= lx as f64 {
                continue;
            }
            cur_x
        } else {
            if x >= cur_x as f64 {
                continue;
            }
            lx
        };

        let (test1, test2) = if cur_y < ly {
            if y < cur_y as f64 || y >= ly as f64 {
                continue;
            }
            if x < left_x as f64 {
                hits += 1;
                continue;
            }
            (x - cur_x as f64, y - cur_y as f64)
        } else {
            if y < ly as f64 || y >= cur_y as f64 {
                continue;
            }
            if x < left_x as f64 {
                hits += 1;
                continue;
            }
            (x - lx as f64, y - ly as f64)
        };

        if test1 < test2 / (ly - cur_y) as f64 * (lx - cur_x) as f64 {
            hits += 1;
        }
    }

    hits % 2 == 1
}

fn bounding_box_contains(vertices: &[(i64, i64)], px: i32, py: i32) -> bool {
    let min_x = vertices.iter().map(|v| v.0).min().unwrap_or(0);
    let max_x = vertices.iter().map(|v| v.0).max().unwrap_or(0);
    let min_y = vertices.iter().map(|v| v.1).min().unwrap_or(0);
    let max_y = vertices.iter().map(|v| v.1).max().unwrap_or(0);
    let (px, py) = (px as i64, py as i64);
    min_x < max_x && min_y < max_y && px >= min_x && py >= min_y && px < max_x && py < max_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_are_half_open() {
        assert!(rect_contains(10, 10, 50, 50, 10, 10));
        assert!(rect_contains(10, 10, 50, 50, 59, 59));
        assert!(!rect_contains(10, 10, 50, 50, 60, 30));
        assert!(!rect_contains(10, 10, 50, 50, 30, 60));
        assert!(!rect_contains(10, 10, 50, 50, 9, 30));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        assert!(!rect_contains(0, 0, 0, 10, 0, 0));
        assert!(!ellipse_contains(0, 0, 10, 0, 5, 0));
    }

    #[test]
    fn test_ellipse_excludes_box_corners() {
        assert!(ellipse_contains(0, 0, 50, 50, 25, 25));
        assert!(ellipse_contains(0, 0, 50, 50, 1, 25));
        assert!(!ellipse_contains(0, 0, 50, 50, 0, 0));
        assert!(!ellipse_contains(0, 0, 50, 50, 49, 49));
        // On the boundary (norm^2 == 0.25) is outside.
        assert!(!ellipse_contains(0, 0, 50, 50, 0, 25));
    }

    #[test]
    fn test_triangle_polygon() {
        let triangle = [(25, 0), (50, 50), (0, 50)];
        assert!(polygon_contains(&triangle, 25, 25));
        assert!(polygon_contains(&triangle, 25, 1));
        assert!(!polygon_contains(&triangle, 2, 2));
        assert!(!polygon_contains(&triangle, 48, 2));
        // The bottom edge is excluded, the box is half-open.
        assert!(!polygon_contains(&triangle, 25, 50));
        assert!(polygon_contains(&triangle, 25, 49));
    }

    #[test]
    fn test_degenerate_polygon() {
        assert!(!polygon_contains(&[(0, 0), (10, 10)], 5, 5));
        assert!(!polygon_contains(&[(0, 0), (10, 0), (20, 0)], 5, 0));
    }

    #[test]
    fn test_polygon_beyond_i32_range() {
        let max = i32::MAX as i64;
        let triangle = [(max + 15, 0), (max + 40, 50), (max - 10, 50)];
        assert!(polygon_contains(&triangle, i32::MAX - 1, 40));
        assert!(!polygon_contains(&triangle, i32::MAX - 9, 5));
        assert!(!polygon_contains(&triangle, 5, 5));
    }
}
