// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Startup configuration from the command line and environment.

use crate::io::clipboard::ClipboardMode;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "nvr-masks",
    version,
    about = "Draw motion masks, zones and object masks over an NVR camera snapshot"
)]
pub struct Settings {
    /// Camera to edit (defaults to the first configured camera)
    #[arg(long, env = "NVR_CAMERA")]
    pub camera: Option<String>,

    /// Base URL of the NVR backend, e.g. http://nvr.local:5000
    #[arg(long, env = "NVR_API_HOST")]
    pub api_host: Option<String>,

    /// Read the NVR configuration from a local YAML/JSON file
    #[arg(long, env = "NVR_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Local image to draw over instead of the camera's latest snapshot
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Start with snap-to-edge disabled
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_snap: bool,

    /// Clipboard backend
    #[arg(long, value_enum, default_value_t = ClipboardMode::System)]
    pub clipboard: ClipboardMode,

    /// UI language (en, zh-CN); defaults to $LANG
    #[arg(long, env = "NVR_LANG")]
    pub lang: Option<String>,

    /// Log level (error, warn, info, debug, trace); defaults to $RUST_LOG or info
    #[arg(long, value_parser = parse_level)]
    pub log_level: Option<log::LevelFilter>,
}

fn parse_level(value: &str) -> Result<log::LevelFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown log level '{}'", value))
}

impl Settings {
    /// Requested UI language, from the flag or the locale environment.
    pub fn language(&self) -> String {
        self.lang
            .clone()
            .or_else(|| std::env::var("LANG").ok())
            .unwrap_or_else(|| "en".to_string())
    }

    pub fn snap(&self) -> bool {
        !self.no_snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["nvr-masks"]).unwrap();
        assert!(settings.snap());
        assert_eq!(settings.clipboard, ClipboardMode::System);
        assert!(settings.log_level.is_none());
    }

    #[test]
    fn test_flags() {
        let settings = Settings::try_parse_from([
            "nvr-masks",
            "--camera",
            "front",
            "--api-host",
            "http://nvr:5000",
            "--no-snap",
            "--clipboard",
            "file",
            "--lang",
            "zh-CN",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(settings.camera.as_deref(), Some("front"));
        assert_eq!(settings.api_host.as_deref(), Some("http://nvr:5000"));
        assert!(!settings.snap());
        assert_eq!(settings.clipboard, ClipboardMode::File);
        assert_eq!(settings.language(), "zh-CN");
        assert_eq!(settings.log_level, Some(log::LevelFilter::Debug));
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(Settings::try_parse_from(["nvr-masks", "--clipboard", "osc52"]).is_err());
        assert!(Settings::try_parse_from(["nvr-masks", "--log-level", "loud"]).is_err());
    }
}
