// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! NVR camera configuration.
//!
//! Only the parts of the backend configuration document that the mask editor
//! reads are modelled here; every other key is ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete NVR configuration document (the part we care about).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NvrConfig {
    #[serde(default)]
    pub cameras: BTreeMap<String, CameraConfig>,
}

impl NvrConfig {
    /// Look up a camera by name, or the first configured camera when no name is given.
    pub fn camera(&self, name: Option<&str>) -> Option<(&str, &CameraConfig)> {
        match name {
            Some(name) => self
                .cameras
                .get_key_value(name)
                .map(|(k, v)| (k.as_str(), v)),
            None => self.cameras.iter().next().map(|(k, v)| (k.as_str(), v)),
        }
    }
}

/// Per-camera configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraConfig {
    pub detect: DetectConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub zones: BTreeMap<String, ZoneConfig>,
    #[serde(default)]
    pub objects: ObjectsConfig,
}

/// Detection resolution; all mask coordinates are relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub mask: Option<MaskSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneConfig {
    #[serde(default)]
    pub coordinates: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectsConfig {
    #[serde(default)]
    pub filters: BTreeMap<String, FilterConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub mask: Option<MaskSpec>,
}

/// A mask entry is either a single polyline string or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaskSpec {
    One(String),
    Many(Vec<String>),
}

impl MaskSpec {
    /// All polyline strings in declaration order.
    pub fn polylines(&self) -> Vec<&str> {
        match self {
            MaskSpec::One(s) => vec![s.as_str()],
            MaskSpec::Many(list) => list.iter().map(String::as_str).collect(),
        }
    }
}
