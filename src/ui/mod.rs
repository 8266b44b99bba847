// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components of the mask editor.

pub mod canvas;
pub mod mask_values;
pub mod storage;
pub mod toolbar;
