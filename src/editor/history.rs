// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo over whole collection snapshots.

use super::collections::MaskCollections;

/// Maximum number of undo steps kept.
const MAX_HISTORY: usize = 50;

/// History system for undo/redo functionality.
#[derive(Debug, Default)]
pub struct History {
    /// Undo stack (past states)
    undo_stack: Vec<MaskCollections>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<MaskCollections>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the current state before making a change
    pub fn push(&mut self, snapshot: MaskCollections) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
        // A new action invalidates everything that was undone
        self.redo_stack.clear();
    }

    /// Undo: restore previous state
    pub fn undo(&mut self, current: MaskCollections) -> Option<MaskCollections> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Redo: restore next state
    pub fn redo(&mut self, current: MaskCollections) -> Option<MaskCollections> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
