// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Small self-contained helpers.

pub mod geometry;
pub mod time_ago;
pub mod units;
