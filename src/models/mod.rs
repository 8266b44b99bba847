// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: polygons, camera configuration and backend statistics.

pub mod camera;
pub mod polygon;
pub mod stats;
