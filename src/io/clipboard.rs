// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clipboard capability.
//!
//! The editor copies YAML fragments through the [`Clipboard`] trait. The
//! platform clipboard is used when available; the file fallback writes the
//! text next to the temp directory and keeps it around so the UI can show it
//! in a selectable text field for manual copying.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Failed to copy text: could not write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can receive plain text.
pub trait Clipboard {
    fn name(&self) -> &'static str;

    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Text the operator still has to copy by hand, if this backend needs that.
    fn pending_text(&self) -> Option<&str> {
        None
    }

    fn dismiss_pending(&mut self) {}
}

/// Which clipboard backend to use, chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ClipboardMode {
    /// Platform clipboard via the window system
    #[default]
    System,
    /// Write to a file and show the text for manual copying
    File,
}

/// Platform clipboard, reached through the egui integration.
pub struct SystemClipboard {
    ctx: egui::Context,
}

impl SystemClipboard {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl Clipboard for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.ctx.copy_text(text.to_string());
        Ok(())
    }
}

/// Fallback: persist the text to a file and keep it for display.
pub struct FileClipboard {
    path: PathBuf,
    pending: Option<String>,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending: None,
        }
    }

    /// Default location in the system temp directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join("nvr-masks-clipboard.yml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    fn name(&self) -> &'static str {
        "file"
    }

    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        std::fs::write(&self.path, text).map_err(|source| ClipboardError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.pending = Some(text.to_string());
        log::info!("Wrote clipboard text to {}", self.path.display());
        Ok(())
    }

    fn pending_text(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    fn dismiss_pending(&mut self) {
        self.pending = None;
    }
}

/// Build the clipboard backend for `mode`.
pub fn from_mode(mode: ClipboardMode, ctx: &egui::Context) -> Box<dyn Clipboard> {
    match mode {
        ClipboardMode::System => Box::new(SystemClipboard::new(ctx.clone())),
        ClipboardMode::File => Box::new(FileClipboard::in_temp_dir()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_clipboard_writes_and_keeps_text() {
        let dir = tempdir().unwrap();
        let mut clipboard = FileClipboard::new(dir.path().join("clip.yml"));
        clipboard.copy_text("  zones:").unwrap();

        assert_eq!(std::fs::read_to_string(clipboard.path()).unwrap(), "  zones:");
        assert_eq!(clipboard.pending_text(), Some("  zones:"));
        clipboard.dismiss_pending();
        assert_eq!(clipboard.pending_text(), None);
    }

    #[test]
    fn test_file_clipboard_reports_io_failure() {
        let dir = tempdir().unwrap();
        let mut clipboard = FileClipboard::new(dir.path().join("missing").join("clip.yml"));
        let err = clipboard.copy_text("x").unwrap_err();
        assert!(err.to_string().starts_with("Failed to copy text"));
        assert_eq!(clipboard.pending_text(), None);
    }

    #[test]
    fn test_system_clipboard_accepts_text() {
        let ctx = egui::Context::default();
        let mut clipboard = from_mode(ClipboardMode::System, &ctx);
        assert_eq!(clipboard.name(), "system");
        assert!(clipboard.copy_text("  motion:").is_ok());
        assert!(clipboard.pending_text().is_none());
    }
}
