// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Storage and memory usage window.

use crate::i18n::Catalog;
use crate::models::stats::{CameraStorage, CameraStorageMap, Stats, UsageRow};
use crate::util::units::format_unit_size;

/// Cells of a per-camera row: used, usage percent, stream bandwidth.
pub fn camera_cells(catalog: &Catalog, camera: &CameraStorage) -> [String; 3] {
    let used = format_unit_size(camera.usage.unwrap_or(0.0).round());
    let percent = format!("{}%", camera.usage_percent.unwrap_or(0.0).round());
    let bandwidth = match camera.bandwidth {
        Some(bandwidth) if bandwidth > 0.0 => format!("{}/h", format_unit_size(bandwidth)),
        _ => catalog.text("Calculating..."),
    };
    [used, percent, bandwidth]
}

fn usage_table(ui: &mut egui::Ui, catalog: &Catalog, id: &str, rows: &[UsageRow]) {
    egui::Grid::new(id).striped(true).num_columns(3).show(ui, |ui| {
        ui.strong(catalog.text("Location"));
        ui.strong(catalog.text("Used"));
        ui.strong(catalog.text("Total"));
        ui.end_row();
        for row in rows {
            ui.label(catalog.text(row.label));
            ui.label(format_unit_size(row.usage.used));
            ui.label(format_unit_size(row.usage.total));
            ui.end_row();
        }
    });
}

/// Display the storage overview. `None` data shows a spinner.
pub fn show(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    stats: Option<&Stats>,
    storage: Option<&CameraStorageMap>,
) {
    let (Some(stats), Some(storage)) = (stats, storage) else {
        ui.spinner();
        return;
    };

    ui.heading(catalog.text("Data"));
    usage_table(ui, catalog, "storage_data", &stats.service.data_rows());
    ui.add_space(8.0);

    ui.heading(catalog.text("Memory"));
    usage_table(ui, catalog, "storage_memory", &stats.service.memory_rows());
    ui.add_space(8.0);

    ui.heading(catalog.text("Cameras"));
    egui::Grid::new("storage_cameras").striped(true).num_columns(4).show(ui, |ui| {
        ui.label("");
        ui.strong(catalog.text("Used"));
        ui.strong(catalog.text("Usage"));
        ui.strong(catalog.text("Stream Bandwidth"));
        ui.end_row();
        for (name, camera) in storage {
            ui.label(name.replace('_', " "));
            for cell in camera_cells(catalog, camera) {
                ui.label(cell);
            }
            ui.end_row();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_cells() {
        let catalog = Catalog::english();
        let camera = CameraStorage {
            usage: Some(2047.6),
            usage_percent: Some(12.4),
            bandwidth: Some(512.0),
        };
        assert_eq!(camera_cells(&catalog, &camera), ["2.00 GB", "12%", "512 MB/h"]);
    }

    #[test]
    fn test_camera_cells_without_bandwidth() {
        let catalog = Catalog::english();
        let cells = camera_cells(&catalog, &CameraStorage::default());
        assert_eq!(cells, ["0 MB", "0%", "Calculating..."]);
    }
}
