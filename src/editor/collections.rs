// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The named point-set collections of one camera.
//!
//! Every update returns a new [`MaskCollections`] value; the receiver is left
//! untouched so that older versions (undo history, a frame still being
//! drawn) remain valid.

use super::session::EditTarget;
use super::EditorError;
use crate::codec::{self, CodecError};
use crate::models::camera::CameraConfig;
use crate::models::polygon::Polygon;
use std::collections::BTreeMap;
use std::fmt;

/// Motion masks, zones and object-filter masks of one camera, in pixel space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskCollections {
    pub motion_masks: Vec<Polygon>,
    pub zones: BTreeMap<String, Polygon>,
    pub object_masks: BTreeMap<String, Vec<Polygon>>,
}

/// A configured polyline that could not be decoded and was left out.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub slot: String,
    pub error: CodecError,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.slot, self.error)
    }
}

impl MaskCollections {
    /// Decode every polygon configured for a camera.
    ///
    /// Empty slots are dropped silently; malformed ones are dropped and
    /// reported.
    pub fn from_camera(camera: &CameraConfig) -> (Self, Vec<LoadWarning>) {
        let (width, height) = (camera.detect.width, camera.detect.height);
        let mut warnings = Vec::new();
        let mut decode_slot = |slot: String, polyline: Option<&str>| -> Option<Polygon> {
            match codec::decode_opt(polyline, width, height) {
                Ok(polygon) => polygon,
                Err(error) => {
                    log::warn!("Ignoring unreadable polygon {}: {}", slot, error);
                    warnings.push(LoadWarning { slot, error });
                    None
                }
            }
        };

        let motion_masks = camera
            .motion
            .mask
            .as_ref()
            .map(|spec| spec.polylines())
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(i, polyline)| decode_slot(format!("motion.mask.{}", i), Some(polyline)))
            .collect();

        let zones = camera
            .zones
            .iter()
            .filter_map(|(name, zone)| {
                decode_slot(format!("zones.{}.coordinates", name), zone.coordinates.as_deref())
                    .map(|polygon| (name.clone(), polygon))
            })
            .collect();

        let object_masks = camera
            .objects
            .filters
            .iter()
            .map(|(name, filter)| {
                let polygons = filter
                    .mask
                    .as_ref()
                    .map(|spec| spec.polylines())
                    .unwrap_or_default()
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, polyline)| {
                        decode_slot(format!("objects.filters.{}.mask.{}", name, i), Some(polyline))
                    })
                    .collect();
                (name.clone(), polygons)
            })
            .collect();

        (
            Self {
                motion_masks,
                zones,
                object_masks,
            },
            warnings,
        )
    }

    pub fn polygon(&self, target: &EditTarget) -> Option<&Polygon> {
        match target {
            EditTarget::MotionMask(index) => self.motion_masks.get(*index),
            EditTarget::Zone(name) => self.zones.get(name),
            EditTarget::ObjectMask(name, index) => {
                self.object_masks.get(name).and_then(|list| list.get(*index))
            }
        }
    }

    pub fn contains(&self, target: &EditTarget) -> bool {
        self.polygon(target).is_some()
    }

    /// Replace the polygon at `target`, dispatching on the target variant.
    pub fn with_polygon(&self, target: &EditTarget, polygon: Polygon) -> Result<Self, EditorError> {
        if !self.contains(target) {
            return Err(EditorError::UnknownTarget(target.clone()));
        }
        let mut next = self.clone();
        match target {
            EditTarget::MotionMask(index) => next.motion_masks[*index] = polygon,
            EditTarget::Zone(name) => {
                next.zones.insert(name.clone(), polygon);
            }
            EditTarget::ObjectMask(name, index) => {
                if let Some(list) = next.object_masks.get_mut(name) {
                    list[*index] = polygon;
                }
            }
        }
        Ok(next)
    }

    /// Append an empty motion mask. Returns the new collections and its target.
    pub fn with_motion_mask_added(&self) -> (Self, EditTarget) {
        let mut next = self.clone();
        next.motion_masks.push(Polygon::default());
        let target = EditTarget::MotionMask(next.motion_masks.len() - 1);
        (next, target)
    }

    pub fn with_motion_mask_removed(&self, index: usize) -> Result<Self, EditorError> {
        if index >= self.motion_masks.len() {
            return Err(EditorError::UnknownTarget(EditTarget::MotionMask(index)));
        }
        let mut next = self.clone();
        next.motion_masks.remove(index);
        Ok(next)
    }

    /// Add an empty zone named `zone_<n>`.
    pub fn with_zone_added(&self) -> (Self, EditTarget) {
        let name = next_name("zone_", self.zones.keys());
        let mut next = self.clone();
        next.zones.insert(name.clone(), Polygon::default());
        (next, EditTarget::Zone(name))
    }

    pub fn with_zone_removed(&self, name: &str) -> Result<Self, EditorError> {
        if !self.zones.contains_key(name) {
            return Err(EditorError::UnknownTarget(EditTarget::Zone(name.to_string())));
        }
        let mut next = self.clone();
        next.zones.remove(name);
        Ok(next)
    }

    /// Add an object filter named `object_<n>` holding one empty mask.
    pub fn with_object_mask_added(&self) -> (Self, EditTarget) {
        let name = next_name("object_", self.object_masks.keys());
        let mut next = self.clone();
        next.object_masks.insert(name.clone(), vec![Polygon::default()]);
        (next, EditTarget::ObjectMask(name, 0))
    }

    /// Add another empty mask to an existing object filter.
    pub fn with_object_mask_appended(&self, name: &str) -> Result<(Self, EditTarget), EditorError> {
        let mut next = self.clone();
        let list = next
            .object_masks
            .get_mut(name)
            .ok_or_else(|| EditorError::UnknownTarget(EditTarget::ObjectMask(name.to_string(), 0)))?;
        list.push(Polygon::default());
        let target = EditTarget::ObjectMask(name.to_string(), list.len() - 1);
        Ok((next, target))
    }

    /// Remove one mask of an object filter. The filter stays listed even when emptied.
    pub fn with_object_mask_removed(&self, name: &str, index: usize) -> Result<Self, EditorError> {
        let target = EditTarget::ObjectMask(name.to_string(), index);
        if !self.contains(&target) {
            return Err(EditorError::UnknownTarget(target));
        }
        let mut next = self.clone();
        if let Some(list) = next.object_masks.get_mut(name) {
            list.remove(index);
        }
        Ok(next)
    }
}

/// First `<prefix><n>` not already taken, starting from the number of
/// existing names with that prefix.
fn next_name<'a>(prefix: &str, existing: impl Iterator<Item = &'a String> + Clone) -> String {
    let mut n = existing.clone().filter(|name| name.starts_with(prefix)).count();
    loop {
        let candidate = format!("{}{}", prefix, n);
        if !existing.clone().any(|name| *name == candidate) {
            return candidate;
        }
        n += 1;
    }
}
