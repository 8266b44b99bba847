// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Human-readable storage sizes.

const MB_PER_GB: f64 = 1024.0;
const MB_PER_TB: f64 = 1024.0 * 1024.0;

/// Format a size given in megabytes as MB, GB or TB.
pub fn format_unit_size(mb: f64) -> String {
    if mb.is_nan() || mb < 0.0 {
        return "Invalid number".to_string();
    }
    if mb < MB_PER_GB {
        format!("{} MB", mb)
    } else if mb < MB_PER_TB {
        format!("{:.2} GB", mb / MB_PER_GB)
    } else {
        format!("{:.2} TB", mb / MB_PER_TB)
    }
}
