// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! NVR Masks - motion mask, zone and object mask editor
//!
//! A desktop application for drawing the polygons an NVR uses to ignore
//! motion, define zones and filter object detections, on top of a camera
//! snapshot.

mod app;
mod codec;
mod editor;
mod export;
mod i18n;
mod io;
mod models;
mod settings;
mod ui;
mod util;

use anyhow::Result;
use app::MaskApp;
use clap::Parser;
use settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::parse();

    // Initialize logging; --log-level overrides RUST_LOG
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = settings.log_level {
        logger.filter_level(level);
    }
    logger.init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 860.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("NVR Masks - Mask & Zone creator"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "NVR Masks",
        options,
        Box::new(|cc| Ok(Box::new(MaskApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
