// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Storage and memory statistics reported by the NVR backend.
//!
//! All sizes are in megabytes, as the backend reports them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RECORDINGS_MOUNT: &str = "/media/frigate/recordings";
pub const CLIPS_MOUNT: &str = "/media/frigate/clips";
pub const SHM_MOUNT: &str = "/dev/shm";
pub const CACHE_MOUNT: &str = "/tmp/cache";

/// Response of the `stats` endpoint (only the service section is used).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub service: ServiceStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStats {
    #[serde(default)]
    pub storage: BTreeMap<String, MountUsage>,
}

/// Used and total size of one mount point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MountUsage {
    #[serde(default)]
    pub used: f64,
    #[serde(default)]
    pub total: f64,
}

/// Response of the `recordings/storage` endpoint, keyed by camera name.
pub type CameraStorageMap = BTreeMap<String, CameraStorage>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraStorage {
    #[serde(default)]
    pub usage: Option<f64>,
    #[serde(default)]
    pub usage_percent: Option<f64>,
    #[serde(default)]
    pub bandwidth: Option<f64>,
}

/// One labelled row of a usage table.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRow {
    pub label: &'static str,
    pub usage: MountUsage,
}

impl ServiceStats {
    fn mount(&self, path: &str) -> MountUsage {
        self.storage.get(path).copied().unwrap_or_default()
    }

    /// Rows for the data overview.
    ///
    /// Recordings and snapshots get separate rows only when they live on
    /// different volumes (their totals differ).
    pub fn data_rows(&self) -> Vec<UsageRow> {
        let recordings = self.mount(RECORDINGS_MOUNT);
        let clips = self.mount(CLIPS_MOUNT);
        if recordings.total != clips.total {
            vec![
                UsageRow { label: "Recordings", usage: recordings },
                UsageRow { label: "Snapshots", usage: clips },
            ]
        } else {
            vec![UsageRow { label: "Recordings & Snapshots", usage: recordings }]
        }
    }

    /// Rows for the memory overview.
    pub fn memory_rows(&self) -> Vec<UsageRow> {
        vec![
            UsageRow { label: SHM_MOUNT, usage: self.mount(SHM_MOUNT) },
            UsageRow { label: CACHE_MOUNT, usage: self.mount(CACHE_MOUNT) },
        ]
    }
}
