// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Listing of one point-set collection.
//!
//! Renders the collection as the YAML it exports to. Polygon lines are
//! clickable to select them for editing, and each collection has Copy, Add
//! and Save buttons.

use crate::codec::encode_pixels;
use crate::editor::session::{CollectionKind, EditTarget};
use crate::editor::Editor;
use crate::export::{fragment_lines, LineRole};
use crate::i18n::Catalog;

/// What the operator asked for in a listing panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    None,
    Copy(CollectionKind),
    Save(CollectionKind),
    Create(CollectionKind),
    Edit(EditTarget),
    Remove(EditTarget),
    AddTo(String),
}

/// Display the listing of `kind`.
pub fn show(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    kind: CollectionKind,
    editor: &Editor,
    can_save: bool,
) -> ListAction {
    let mut action = ListAction::None;

    ui.horizontal(|ui| {
        ui.heading(catalog.text(kind.title()));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let save = ui
                .add_enabled(can_save, egui::Button::new(catalog.text("Save")))
                .on_disabled_hover_text("Start with --api-host to save to the NVR");
            if save.clicked() {
                action = ListAction::Save(kind);
            }
            if ui.button(catalog.text("Add")).clicked() {
                action = ListAction::Create(kind);
            }
            if ui.button(catalog.text("Copy")).clicked() {
                action = ListAction::Copy(kind);
            }
        });
    });

    let (width, height) = editor.dimensions();
    let lines = fragment_lines(kind, editor.collections(), width, height, true);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        for line in lines {
            let text = egui::RichText::new(&line.text).monospace();
            match line.role {
                LineRole::Heading => {
                    ui.label(text);
                }
                LineRole::ObjectHeading(name) => {
                    ui.horizontal(|ui| {
                        ui.label(text);
                        let label = catalog.format("Add to {name}", &[("name", name.as_str())]);
                        if ui.small_button(label).clicked() {
                            action = ListAction::AddTo(name.clone());
                        }
                    });
                }
                LineRole::Polygon(target) => {
                    ui.horizontal(|ui| {
                        let selected = editor.is_editing(&target);
                        let pixels = editor
                            .collections()
                            .polygon(&target)
                            .map(encode_pixels)
                            .unwrap_or_default();
                        let item = ui
                            .selectable_label(selected, text)
                            .on_hover_text(format!("{}\n{}", catalog.text("Click to edit"), pixels));
                        if item.clicked() {
                            action = ListAction::Edit(target.clone());
                        }
                        let remove = egui::Button::new(
                            egui::RichText::new(catalog.text("Remove")).color(egui::Color32::LIGHT_RED),
                        )
                        .small();
                        if ui.add(remove).clicked() {
                            action = ListAction::Remove(target.clone());
                        }
                    });
                }
            }
        }
    });

    action
}
