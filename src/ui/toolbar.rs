// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar above the canvas.
//!
//! Shows the editing instructions, what is currently selected and the
//! snap-to-edges switch.

use crate::editor::session::EditTarget;
use crate::i18n::Catalog;

/// Display the toolbar. Returns true when the snap switch was toggled.
pub fn show(ui: &mut egui::Ui, catalog: &Catalog, target: Option<&EditTarget>, snap: &mut bool) -> bool {
    let mut toggled = false;
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let selection = match target {
            Some(target) => catalog.format("Editing: {target}", &[("target", target.to_string().as_str())]),
            None => catalog.text("Nothing selected"),
        };
        ui.label(egui::RichText::new(selection).strong());

        ui.separator();

        if ui.checkbox(snap, catalog.text("Snap to edges")).changed() {
            toggled = true;
        }

        ui.separator();

        let hints = [
            "Click to add a point.",
            "Click and hold on an existing point to move it.",
            "Right-Click on an existing point to delete it.",
        ];
        let text = hints.iter().map(|id| catalog.text(id)).collect::<Vec<_>>().join(" ");
        ui.label(egui::RichText::new(text).italics().weak());
    });
    toggled
}
