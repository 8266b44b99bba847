// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Polygon data structures.
//!
//! Points are stored in natural pixel coordinates of the camera's detect
//! resolution. A polygon is always closed: the last point connects back to
//! the first.

use serde::{Deserialize, Serialize};

/// A 2D point in natural pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An ordered, closed sequence of points.
///
/// Editing operations never touch the receiver; each returns a new polygon
/// so that snapshots held elsewhere (undo history, the listing panel) stay
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Insert a point before `index` (or at the end when `index == len`).
    pub fn with_point_inserted(&self, index: usize, point: Point) -> Polygon {
        let mut points = self.points.clone();
        points.insert(index.min(points.len()), point);
        Polygon { points }
    }

    /// Replace the point at `index`. Out-of-range indices leave the copy unchanged.
    pub fn with_point_replaced(&self, index: usize, point: Point) -> Polygon {
        let mut points = self.points.clone();
        if let Some(slot) = points.get_mut(index) {
            *slot = point;
        }
        Polygon { points }
    }

    /// Remove the point at `index`. Out-of-range indices leave the copy unchanged.
    pub fn with_point_removed(&self, index: usize) -> Polygon {
        let mut points = self.points.clone();
        if index < points.len() {
            points.remove(index);
        }
        Polygon { points }
    }
}

impl From<Vec<(i32, i32)>> for Polygon {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Self::new(points.into_iter().map(Point::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from(vec![(0, 0), (100, 0), (100, 100), (0, 100)])
    }

    #[test]
    fn test_insert_leaves_original_untouched() {
        let original = square();
        let kept = original.clone();
        let edited = original.with_point_inserted(1, Point::new(50, -5));

        assert_eq!(original, kept);
        assert_eq!(edited.len(), 5);
        assert_eq!(edited.points()[1], Point::new(50, -5));
    }

    #[test]
    fn test_replace_and_remove() {
        let original = square();
        let moved = original.with_point_replaced(2, Point::new(90, 90));
        assert_eq!(moved.points()[2], Point::new(90, 90));
        assert_eq!(original.points()[2], Point::new(100, 100));

        let removed = moved.with_point_removed(0);
        assert_eq!(removed.points(), &[Point::new(100, 0), Point::new(90, 90), Point::new(0, 100)]);
        assert_eq!(moved.len(), 4);
    }

    #[test]
    fn test_out_of_range_edits_are_noops() {
        let original = square();
        assert_eq!(original.with_point_replaced(9, Point::new(1, 1)), original);
        assert_eq!(original.with_point_removed(9), original);
        assert_eq!(original.with_point_inserted(9, Point::new(1, 1)).points()[4], Point::new(1, 1));
    }

    #[test]
    fn test_distance() {
        assert!((Point::new(0, 0).distance(&Point::new(3, 4)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_across_full_i32_range() {
        let far = Point::new(i32::MIN, 0).distance(&Point::new(i32::MAX, 0));
        assert_eq!(far, f64::from(u32::MAX));
    }
}
