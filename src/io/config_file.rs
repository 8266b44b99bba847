// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! NVR configuration file import.
//!
//! Reads the configuration from a local YAML or JSON file, for working
//! offline or against a copy of `config.yml`.

use crate::models::camera::NvrConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Import the configuration, picking the parser from the file extension.
pub fn import_config(path: &Path) -> Result<NvrConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let extension = path.extension().and_then(|s| s.to_str());
    let config: NvrConfig = match extension {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse YAML {}", path.display()))?,
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON {}", path.display()))?,
        _ => bail!("Unsupported file extension: {:?}", extension),
    };
    log::info!("Imported {} cameras from {}", config.cameras.len(), path.display());
    Ok(config)
}
