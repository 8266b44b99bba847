// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between canvas,
//! natural pixel and normalized space, the snap-to-edge policy, and the
//! nearest-segment search used when inserting points into a polygon.

use crate::models::polygon::Point;

/// Distance (in natural pixels) from a frame edge within which points snap to it.
pub const MASK_INSET: i32 = 20;

/// Convert a pixel coordinate to a normalized coordinate (0.0 to 1.0).
pub fn normalize_coordinate(pixel: i32, size: u32) -> f64 {
    if size == 0 {
        return 0.0;
    }
    (f64::from(pixel) / f64::from(size)).clamp(0.0, 1.0)
}

/// Convert a normalized coordinate to the nearest pixel coordinate.
pub fn denormalize_coordinate(fraction: f64, size: u32) -> i32 {
    (fraction * f64::from(size)).round() as i32
}

/// Clamp a natural-space value into `[0, max]`, optionally snapping it to the
/// frame edge when it lies within [`MASK_INSET`] of either border.
pub fn snap_to_edge(value: f64, max: u32, snap: bool) -> i32 {
    let max = i32::try_from(max).unwrap_or(i32::MAX);
    let clamped = (value.round() as i32).clamp(0, max);
    if snap {
        if clamped <= MASK_INSET {
            return 0;
        } else if max - clamped <= MASK_INSET {
            return max;
        }
    }
    clamped
}

/// Index of the closing-polygon segment `points[i] -> points[i + 1]` (wrapping
/// from the last point to the first) for which the detour through `point` is
/// shortest. Ties keep the lowest index.
pub fn nearest_segment(points: &[Point], point: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, start) in points.iter().enumerate() {
        let end = &points[(i + 1) % points.len()];
        let detour = start.distance(&point) + point.distance(end);
        match best {
            Some((_, distance)) if distance <= detour => {}
            _ => best = Some((i, detour)),
        }
    }
    best.map(|(i, _)| i)
}

/// Position at which `point` should be inserted to land on its nearest segment.
pub fn insertion_index(points: &[Point], point: Point) -> usize {
    nearest_segment(points, point).map_or(0, |segment| segment + 1)
}

/// Ratio between the rendered image width and the detect width.
pub fn display_scale(rendered_width: f32, detect_width: u32) -> f32 {
    if detect_width == 0 {
        return 1.0;
    }
    rendered_width / detect_width as f32
}

/// Convert an offset inside the rendered image to natural pixel space.
pub fn canvas_to_natural(offset_x: f32, offset_y: f32, scale: f32) -> (f64, f64) {
    if scale <= 0.0 {
        return (f64::from(offset_x), f64::from(offset_y));
    }
    (f64::from(offset_x / scale), f64::from(offset_y / scale))
}

/// Convert a natural pixel point to an offset inside the rendered image.
pub fn natural_to_canvas(point: &Point, scale: f32) -> (f32, f32) {
    ((point.x as f32 * scale).round(), (point.y as f32 * scale).round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_denormalize_roundtrip() {
        let width = 1920;
        let pixel = 960;

        let normalized = normalize_coordinate(pixel, width);
        assert!((normalized - 0.5).abs() < 0.0001);
        assert_eq!(denormalize_coordinate(normalized, width), pixel);
    }

    #[test]
    fn test_normalize_corners() {
        assert_eq!(normalize_coordinate(0, 1080), 0.0);
        assert_eq!(normalize_coordinate(1080, 1080), 1.0);
        assert_eq!(normalize_coordinate(-5, 1080), 0.0);
        assert_eq!(normalize_coordinate(10, 0), 0.0);
    }

    #[test]
    fn test_snap_boundaries() {
        assert_eq!(snap_to_edge(15.0, 100, true), 0);
        assert_eq!(snap_to_edge(85.0, 100, true), 100);
        assert_eq!(snap_to_edge(50.0, 100, true), 50);
        assert_eq!(snap_to_edge(15.0, 100, false), 15);
        assert_eq!(snap_to_edge(20.0, 100, true), 0);
        assert_eq!(snap_to_edge(21.0, 100, true), 21);
    }

    #[test]
    fn test_snap_clamps_out_of_frame_values() {
        assert_eq!(snap_to_edge(-40.0, 100, false), 0);
        assert_eq!(snap_to_edge(140.0, 100, false), 100);
        assert_eq!(snap_to_edge(49.6, 100, false), 50);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for snap in [true, false] {
            for raw in [-10.0, 0.0, 7.0, 19.5, 20.0, 33.3, 64.0, 79.0, 80.0, 99.0, 130.0] {
                let once = snap_to_edge(raw, 100, snap);
                assert_eq!(snap_to_edge(f64::from(once), 100, snap), once, "raw {raw}");
            }
        }
    }

    #[test]
    fn test_nearest_segment_insertion() {
        let square = [
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ];
        let point = Point::new(50, -5);
        assert_eq!(nearest_segment(&square, point), Some(0));
        assert_eq!(insertion_index(&square, point), 1);
    }

    #[test]
    fn test_nearest_segment_uses_closing_edge() {
        let square = [
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ];
        assert_eq!(nearest_segment(&square, Point::new(-5, 50)), Some(3));
        assert_eq!(insertion_index(&square, Point::new(-5, 50)), 4);
    }

    #[test]
    fn test_insertion_into_small_polygons() {
        assert_eq!(nearest_segment(&[], Point::new(1, 1)), None);
        assert_eq!(insertion_index(&[], Point::new(1, 1)), 0);
        assert_eq!(insertion_index(&[Point::new(5, 5)], Point::new(1, 1)), 1);
    }

    #[test]
    fn test_canvas_natural_conversion() {
        let scale = display_scale(640.0, 1280);
        assert!((scale - 0.5).abs() < f32::EPSILON);
        assert_eq!(canvas_to_natural(100.0, 50.0, scale), (200.0, 100.0));
        assert_eq!(natural_to_canvas(&Point::new(200, 101), scale), (100.0, 51.0));
        assert_eq!(display_scale(640.0, 0), 1.0);
    }
}
