// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask and zone editing state.
//!
//! [`Editor`] owns the camera's point-set collections, the current
//! selection and the undo history. The canvas translates pointer gestures
//! into natural pixel coordinates and calls into it; every successful edit
//! commits a fresh [`MaskCollections`] value.

pub mod collections;
pub mod history;
pub mod session;

use crate::models::camera::CameraConfig;
use crate::models::polygon::{Point, Polygon};
use crate::util::geometry::{insertion_index, snap_to_edge};
use collections::{LoadWarning, MaskCollections};
use history::History;
use session::{EditTarget, EditingSession};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("You must choose an item to edit or add a new item before adding a point.")]
    NoTargetSelected,

    #[error("{0} does not exist")]
    UnknownTarget(EditTarget),

    #[error("point {index} does not exist in a polygon of {len} points")]
    PointOutOfRange { index: usize, len: usize },
}

/// Editing state for one camera.
#[derive(Debug)]
pub struct Editor {
    collections: MaskCollections,
    session: EditingSession,
    history: History,
    snap: bool,
    width: u32,
    height: u32,
    /// Point index currently being dragged; its handle is hidden.
    dragging: Option<usize>,
    /// Whether the current drag already recorded an undo step.
    drag_recorded: bool,
}

impl Editor {
    pub fn new(collections: MaskCollections, width: u32, height: u32, snap: bool) -> Self {
        let target = (!collections.motion_masks.is_empty()).then_some(EditTarget::MotionMask(0));
        Self {
            collections,
            session: EditingSession::new(target),
            history: History::new(),
            snap,
            width,
            height,
            dragging: None,
            drag_recorded: false,
        }
    }

    /// Build an editor from the camera's stored configuration.
    pub fn from_camera(camera: &CameraConfig, snap: bool) -> (Self, Vec<LoadWarning>) {
        let (collections, warnings) = MaskCollections::from_camera(camera);
        log::info!(
            "Loaded {} motion masks, {} zones, {} object filters ({} warnings)",
            collections.motion_masks.len(),
            collections.zones.len(),
            collections.object_masks.len(),
            warnings.len()
        );
        (
            Self::new(collections, camera.detect.width, camera.detect.height, snap),
            warnings,
        )
    }

    pub fn collections(&self) -> &MaskCollections {
        &self.collections
    }

    pub fn target(&self) -> Option<&EditTarget> {
        self.session.target.as_ref()
    }

    pub fn is_editing(&self, target: &EditTarget) -> bool {
        self.session.is_editing(target)
    }

    /// The polygon being edited, if any.
    pub fn editing_polygon(&self) -> Option<&Polygon> {
        self.target().and_then(|target| self.collections.polygon(target))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn snap(&self) -> bool {
        self.snap
    }

    pub fn set_snap(&mut self, snap: bool) {
        self.snap = snap;
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub fn select(&mut self, target: EditTarget) -> Result<(), EditorError> {
        if !self.collections.contains(&target) {
            return Err(EditorError::UnknownTarget(target));
        }
        log::debug!("Editing {}", target);
        self.session.target = Some(target);
        Ok(())
    }

    fn snapped(&self, x: f64, y: f64) -> Point {
        Point::new(
            snap_to_edge(x, self.width, self.snap),
            snap_to_edge(y, self.height, self.snap),
        )
    }

    fn selected(&self) -> Result<(EditTarget, &Polygon), EditorError> {
        let target = self.session.target.clone().ok_or(EditorError::NoTargetSelected)?;
        let polygon = self
            .collections
            .polygon(&target)
            .ok_or_else(|| EditorError::UnknownTarget(target.clone()))?;
        Ok((target, polygon))
    }

    fn commit(&mut self, next: MaskCollections, record: bool) {
        let previous = std::mem::replace(&mut self.collections, next);
        if record {
            self.history.push(previous);
        }
    }

    /// Add a point at natural coordinates, between its two nearest neighbours.
    /// Returns the index it was inserted at.
    pub fn add_point(&mut self, x: f64, y: f64) -> Result<usize, EditorError> {
        let (target, polygon) = self.selected()?;
        let point = self.snapped(x, y);
        let index = insertion_index(polygon.points(), point);
        let next = self
            .collections
            .with_polygon(&target, polygon.with_point_inserted(index, point))?;
        self.commit(next, true);
        log::debug!("Added point ({}, {}) at index {} of {}", point.x, point.y, index, target);
        Ok(index)
    }

    pub fn begin_drag(&mut self, index: usize) {
        self.dragging = Some(index);
        self.drag_recorded = false;
    }

    /// Move point `index` to natural coordinates. One undo step per drag.
    pub fn drag_point(&mut self, index: usize, x: f64, y: f64) -> Result<(), EditorError> {
        if x < 0.0 && y < 0.0 {
            return Ok(());
        }
        let (target, polygon) = self.selected()?;
        if index >= polygon.len() {
            return Err(EditorError::PointOutOfRange { index, len: polygon.len() });
        }
        let point = self.snapped(x, y);
        if polygon.points()[index] == point {
            return Ok(());
        }
        let next = self
            .collections
            .with_polygon(&target, polygon.with_point_replaced(index, point))?;
        let record = !(self.dragging == Some(index) && self.drag_recorded);
        self.commit(next, record);
        if self.dragging == Some(index) {
            self.drag_recorded = true;
        }
        Ok(())
    }

    pub fn end_drag(&mut self) {
        if let Some(index) = self.dragging.take() {
            log::debug!("Finished moving point {}", index);
        }
        self.drag_recorded = false;
    }

    pub fn remove_point(&mut self, index: usize) -> Result<(), EditorError> {
        let (target, polygon) = self.selected()?;
        if index >= polygon.len() {
            return Err(EditorError::PointOutOfRange { index, len: polygon.len() });
        }
        let next = self
            .collections
            .with_polygon(&target, polygon.with_point_removed(index))?;
        self.commit(next, true);
        log::debug!("Removed point {} of {}", index, target);
        Ok(())
    }

    fn commit_and_select(&mut self, (next, target): (MaskCollections, EditTarget)) {
        self.commit(next, true);
        log::info!("Created {}", target);
        self.session.target = Some(target);
    }

    pub fn add_motion_mask(&mut self) {
        let created = self.collections.with_motion_mask_added();
        self.commit_and_select(created);
    }

    pub fn add_zone(&mut self) {
        let created = self.collections.with_zone_added();
        self.commit_and_select(created);
    }

    pub fn add_object_mask(&mut self) {
        let created = self.collections.with_object_mask_added();
        self.commit_and_select(created);
    }

    pub fn append_object_mask(&mut self, name: &str) -> Result<(), EditorError> {
        let created = self.collections.with_object_mask_appended(name)?;
        self.commit_and_select(created);
        Ok(())
    }

    /// Remove a whole polygon from its collection.
    pub fn remove(&mut self, target: &EditTarget) -> Result<(), EditorError> {
        let next = match target {
            EditTarget::MotionMask(index) => self.collections.with_motion_mask_removed(*index)?,
            EditTarget::Zone(name) => self.collections.with_zone_removed(name)?,
            EditTarget::ObjectMask(name, index) => {
                self.collections.with_object_mask_removed(name, *index)?
            }
        };
        self.commit(next, true);
        self.session.polygon_removed(target);
        log::info!("Removed {}", target);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let current = self.collections.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.collections.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, collections: MaskCollections) {
        self.collections = collections;
        self.dragging = None;
        self.drag_recorded = false;
        if let Some(target) = &self.session.target {
            if !self.collections.contains(target) {
                self.session.target = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_editor(snap: bool) -> Editor {
        let collections = MaskCollections {
            motion_masks: vec![Polygon::from(vec![(0, 0), (100, 0), (100, 100), (0, 100)])],
            ..Default::default()
        };
        Editor::new(collections, 100, 100, snap)
    }

    #[test]
    fn test_first_motion_mask_selected_initially() {
        let editor = square_editor(true);
        assert_eq!(editor.target(), Some(&EditTarget::MotionMask(0)));
        assert!(Editor::new(MaskCollections::default(), 10, 10, true).target().is_none());
    }

    #[test]
    fn test_add_point_on_nearest_segment() {
        let mut editor = square_editor(false);
        let index = editor.add_point(50.0, -5.0).unwrap();
        assert_eq!(index, 1);
        // Clamped into the frame before insertion.
        assert_eq!(editor.editing_polygon().unwrap().points()[1], Point::new(50, 0));
        assert_eq!(editor.editing_polygon().unwrap().len(), 5);
    }

    #[test]
    fn test_add_point_snaps_to_edges() {
        let mut editor = square_editor(true);
        editor.add_point(50.0, 88.0).unwrap();
        assert!(editor.editing_polygon().unwrap().points().contains(&Point::new(50, 100)));
    }

    #[test]
    fn test_add_point_without_selection_fails() {
        let mut editor = Editor::new(MaskCollections::default(), 100, 100, true);
        assert_eq!(editor.add_point(10.0, 10.0), Err(EditorError::NoTargetSelected));
        assert_eq!(
            EditorError::NoTargetSelected.to_string(),
            "You must choose an item to edit or add a new item before adding a point."
        );
    }

    #[test]
    fn test_edits_never_touch_previous_snapshot() {
        let mut editor = square_editor(false);
        let before = editor.collections().clone();
        editor.add_point(50.0, 40.0).unwrap();
        editor.remove_point(0).unwrap();
        assert_eq!(before.motion_masks[0].len(), 4);
        assert_ne!(&before, editor.collections());
    }

    #[test]
    fn test_drag_records_single_undo_step() {
        let mut editor = square_editor(false);
        editor.begin_drag(2);
        editor.drag_point(2, 90.0, 90.0).unwrap();
        editor.drag_point(2, 80.0, 70.0).unwrap();
        assert_eq!(editor.dragging(), Some(2));
        editor.end_drag();
        assert_eq!(editor.dragging(), None);
        assert_eq!(editor.editing_polygon().unwrap().points()[2], Point::new(80, 70));

        assert!(editor.undo());
        assert_eq!(editor.editing_polygon().unwrap().points()[2], Point::new(100, 100));
        assert!(!editor.can_undo());
        assert!(editor.redo());
        assert_eq!(editor.editing_polygon().unwrap().points()[2], Point::new(80, 70));
    }

    #[test]
    fn test_drag_ignores_pointer_outside_both_axes() {
        let mut editor = square_editor(false);
        editor.begin_drag(1);
        editor.drag_point(1, -3.0, -3.0).unwrap();
        assert_eq!(editor.editing_polygon().unwrap().points()[1], Point::new(100, 0));
        assert!(editor.drag_point(9, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_remove_point() {
        let mut editor = square_editor(false);
        editor.remove_point(3).unwrap();
        assert_eq!(editor.editing_polygon().unwrap().len(), 3);
        assert_eq!(
            editor.remove_point(3),
            Err(EditorError::PointOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_created_polygons_are_selected() {
        let mut editor = square_editor(true);
        editor.add_zone();
        assert_eq!(editor.target(), Some(&EditTarget::Zone("zone_0".into())));
        editor.add_point(50.0, 50.0).unwrap();
        assert_eq!(editor.editing_polygon().unwrap().len(), 1);

        editor.add_object_mask();
        assert_eq!(editor.target(), Some(&EditTarget::ObjectMask("object_0".into(), 0)));
        editor.append_object_mask("object_0").unwrap();
        assert_eq!(editor.target(), Some(&EditTarget::ObjectMask("object_0".into(), 1)));

        editor.add_motion_mask();
        assert_eq!(editor.target(), Some(&EditTarget::MotionMask(1)));
    }

    #[test]
    fn test_remove_polygon_fixes_selection() {
        let mut editor = square_editor(true);
        editor.add_motion_mask();
        assert_eq!(editor.target(), Some(&EditTarget::MotionMask(1)));
        editor.remove(&EditTarget::MotionMask(0)).unwrap();
        assert_eq!(editor.target(), Some(&EditTarget::MotionMask(0)));
        editor.remove(&EditTarget::MotionMask(0)).unwrap();
        assert_eq!(editor.target(), None);
        assert!(editor.remove(&EditTarget::Zone("nope".into())).is_err());
    }

    #[test]
    fn test_undo_clears_vanished_selection() {
        let mut editor = square_editor(true);
        editor.add_zone();
        assert!(editor.undo());
        assert!(editor.target().is_none());
        assert!(editor.collections().zones.is_empty());
    }

    #[test]
    fn test_select_requires_existing_target() {
        let mut editor = square_editor(true);
        assert!(editor.select(EditTarget::Zone("porch".into())).is_err());
        editor.add_zone();
        editor.select(EditTarget::MotionMask(0)).unwrap();
        assert!(editor.is_editing(&EditTarget::MotionMask(0)));
    }
}
