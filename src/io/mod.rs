// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O: backend API, configuration files, snapshots and the clipboard.

pub mod api;
pub mod clipboard;
pub mod config_file;
pub mod media;
