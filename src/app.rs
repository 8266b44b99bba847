// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module ties the editor to the window: it owns the loaded camera,
//! runs backend requests and file loads on background threads, and routes
//! canvas and listing actions into the [`Editor`].

use crate::editor::session::CollectionKind;
use crate::editor::Editor;
use crate::export::{query_string, set_config_pairs, yaml_fragment};
use crate::i18n::Catalog;
use crate::io::api::{ApiClient, PersistError};
use crate::io::clipboard::{self, Clipboard};
use crate::io::media::LoadedImage;
use crate::models::camera::NvrConfig;
use crate::models::stats::{CameraStorageMap, Stats};
use crate::settings::Settings;
use crate::ui::{canvas, mask_values, storage, toolbar};
use crate::util::time_ago::time_ago;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

/// Result of a background operation.
enum Loaded {
    Config(Result<NvrConfig, String>),
    Snapshot(Result<LoadedImage, String>),
    Saved(Result<String, PersistError>),
    Storage(Result<(Stats, CameraStorageMap), String>),
}

/// Main application state.
pub struct MaskApp {
    settings: Settings,
    catalog: Catalog,
    api: Option<ApiClient>,
    clipboard: Box<dyn Clipboard>,

    /// Full configuration as last loaded
    config: Option<NvrConfig>,
    /// Name of the camera being edited
    camera: Option<String>,
    editor: Option<Editor>,
    image_texture: Option<egui::TextureHandle>,

    sender: Sender<Loaded>,
    receiver: Receiver<Loaded>,
    loading_message: Option<String>,

    success: Option<String>,
    error: Option<String>,
    warnings: Vec<String>,
    config_loaded_at: Option<DateTime<Utc>>,
    saved_at: Option<DateTime<Utc>>,

    show_storage: bool,
    stats: Option<Stats>,
    storage: Option<CameraStorageMap>,
}

impl MaskApp {
    /// Create the application and kick off the initial loads.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let catalog = Catalog::load(&settings.language());
        let clipboard = clipboard::from_mode(settings.clipboard, &cc.egui_ctx);
        log::info!("Using {} clipboard, language {}", clipboard.name(), catalog.language());
        let api = settings.api_host.as_deref().map(ApiClient::new);
        if let Some(api) = &api {
            log::info!("Using NVR backend at {}", api.host());
        }
        let (sender, receiver) = channel();

        let mut app = Self {
            settings,
            catalog,
            api,
            clipboard,
            config: None,
            camera: None,
            editor: None,
            image_texture: None,
            sender,
            receiver,
            loading_message: None,
            success: None,
            error: None,
            warnings: Vec::new(),
            config_loaded_at: None,
            saved_at: None,
            show_storage: false,
            stats: None,
            storage: None,
        };

        if let Some(path) = app.settings.config_file.clone() {
            app.load_config_file(path, &cc.egui_ctx);
        } else if app.api.is_some() {
            app.fetch_config(&cc.egui_ctx);
        }
        if let Some(path) = app.settings.snapshot.clone() {
            app.load_snapshot_file(path, &cc.egui_ctx);
        }
        app
    }

    /// Run `job` on a background thread and deliver its result to the UI.
    fn spawn<F>(&self, ctx: &egui::Context, job: F)
    where
        F: FnOnce() -> Loaded + Send + 'static,
    {
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = sender.send(job());
            ctx.request_repaint();
        });
    }

    fn load_config_file(&mut self, path: PathBuf, ctx: &egui::Context) {
        self.loading_message = Some(self.catalog.text("Loading configuration..."));
        self.spawn(ctx, move || {
            Loaded::Config(crate::io::config_file::import_config(&path).map_err(|e| format!("{:#}", e)))
        });
    }

    fn fetch_config(&mut self, ctx: &egui::Context) {
        let Some(api) = self.api.clone() else {
            return;
        };
        self.loading_message = Some(self.catalog.text("Loading configuration..."));
        self.spawn(ctx, move || Loaded::Config(api.fetch_config().map_err(|e| e.to_string())));
    }

    fn load_snapshot_file(&mut self, path: PathBuf, ctx: &egui::Context) {
        self.loading_message = Some(self.catalog.text("Loading snapshot..."));
        self.spawn(ctx, move || {
            Loaded::Snapshot(crate::io::media::load_image(&path).map_err(|e| format!("{:#}", e)))
        });
    }

    fn fetch_snapshot(&mut self, camera: String, ctx: &egui::Context) {
        let Some(api) = self.api.clone() else {
            return;
        };
        self.loading_message = Some(self.catalog.text("Loading snapshot..."));
        self.spawn(ctx, move || {
            let result = api
                .fetch_snapshot(&camera)
                .map_err(|e| e.to_string())
                .and_then(|bytes| crate::io::media::decode_image(&bytes).map_err(|e| format!("{:#}", e)));
            Loaded::Snapshot(result)
        });
    }

    fn fetch_storage(&mut self, ctx: &egui::Context) {
        let Some(api) = self.api.clone() else {
            return;
        };
        self.spawn(ctx, move || {
            let result = api
                .fetch_stats()
                .and_then(|stats| api.fetch_storage().map(|storage| (stats, storage)))
                .map_err(|e| e.to_string());
            Loaded::Storage(result)
        });
    }

    /// Select a camera from the loaded configuration and build its editor.
    fn open_camera(&mut self, name: Option<&str>, ctx: &egui::Context) {
        let Some(config) = &self.config else {
            return;
        };
        let Some((name, camera)) = config.camera(name) else {
            self.error = Some(format!("Camera {:?} is not configured", name.unwrap_or_default()));
            return;
        };
        let name = name.to_string();
        let (editor, warnings) = Editor::from_camera(camera, self.settings.snap());
        self.warnings = warnings.iter().map(ToString::to_string).collect();
        self.editor = Some(editor);
        log::info!("Editing camera {}", name);
        if self.settings.snapshot.is_none() {
            self.fetch_snapshot(name.clone(), ctx);
        }
        self.camera = Some(name);
    }

    /// Drain finished background operations.
    fn poll_background(&mut self, ctx: &egui::Context) {
        while let Ok(loaded) = self.receiver.try_recv() {
            match loaded {
                Loaded::Config(Ok(config)) => {
                    self.loading_message = None;
                    self.config = Some(config);
                    self.config_loaded_at = Some(Utc::now());
                    let requested = self.camera.clone().or_else(|| self.settings.camera.clone());
                    self.open_camera(requested.as_deref(), ctx);
                }
                Loaded::Config(Err(e)) => {
                    self.loading_message = None;
                    log::error!("Failed to load configuration: {}", e);
                    self.error = Some(e);
                }
                Loaded::Snapshot(Ok(image)) => {
                    self.loading_message = None;
                    let size = [image.width as usize, image.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                    self.image_texture =
                        Some(ctx.load_texture("snapshot", color_image, egui::TextureOptions::LINEAR));
                    log::info!("Snapshot loaded ({}x{})", image.width, image.height);
                }
                Loaded::Snapshot(Err(e)) => {
                    self.loading_message = None;
                    log::error!("Failed to load snapshot: {}", e);
                    self.error = Some(e);
                }
                Loaded::Saved(Ok(message)) => {
                    log::info!("Configuration updated: {}", message);
                    self.saved_at = Some(Utc::now());
                    self.error = None;
                    self.success = Some(message);
                }
                Loaded::Saved(Err(e)) => {
                    log::error!("Failed to save configuration: {}", e);
                    self.success = None;
                    self.error = Some(e.to_string());
                }
                Loaded::Storage(Ok((stats, storage))) => {
                    self.stats = Some(stats);
                    self.storage = Some(storage);
                }
                Loaded::Storage(Err(e)) => {
                    log::error!("Failed to load storage stats: {}", e);
                    self.error = Some(e);
                }
            }
        }
    }

    fn copy(&mut self, kind: CollectionKind) {
        let Some(editor) = &self.editor else {
            return;
        };
        let (width, height) = editor.dimensions();
        let text = yaml_fragment(kind, editor.collections(), width, height);
        if text.is_empty() {
            self.success = None;
            self.error = Some(self.catalog.text("Nothing to copy"));
            return;
        }
        match self.clipboard.copy_text(&text) {
            Ok(()) => {
                let what = self.catalog.text(kind.title());
                self.success = Some(self.catalog.format("Copied {what} to clipboard", &[("what", what.as_str())]));
                self.error = None;
            }
            Err(e) => {
                log::error!("{}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    fn save(&mut self, kind: CollectionKind, ctx: &egui::Context) {
        let (Some(editor), Some(camera), Some(api)) = (&self.editor, &self.camera, self.api.clone()) else {
            return;
        };
        let (width, height) = editor.dimensions();
        let pairs = set_config_pairs(camera, kind, editor.collections(), width, height);
        if pairs.is_empty() {
            log::info!("No {} with points to save", kind.title());
            self.success = None;
            self.error = Some(self.catalog.text("Nothing to save"));
            return;
        }
        log::info!("PUT config/set?{}", query_string(&pairs));
        self.spawn(ctx, move || Loaded::Saved(api.set_config(&pairs)));
    }

    fn handle_canvas_action(&mut self, action: canvas::CanvasAction) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let result = match action {
            canvas::CanvasAction::None => Ok(()),
            canvas::CanvasAction::AddPoint(x, y) => editor.add_point(x, y).map(|_| ()),
            canvas::CanvasAction::StartDragging(index) => {
                editor.begin_drag(index);
                Ok(())
            }
            canvas::CanvasAction::DragPoint(index, x, y) => editor.drag_point(index, x, y),
            canvas::CanvasAction::StopDragging => {
                editor.end_drag();
                Ok(())
            }
            canvas::CanvasAction::RemovePoint(index) => editor.remove_point(index),
        };
        if let Err(e) = result {
            log::warn!("{}", e);
            self.error = Some(self.catalog.text(&e.to_string()));
        }
    }

    fn handle_list_action(&mut self, action: mask_values::ListAction, ctx: &egui::Context) {
        use mask_values::ListAction;
        match action {
            ListAction::None => {}
            ListAction::Copy(kind) => self.copy(kind),
            ListAction::Save(kind) => self.save(kind, ctx),
            ListAction::Create(kind) => {
                if let Some(editor) = self.editor.as_mut() {
                    match kind {
                        CollectionKind::MotionMasks => editor.add_motion_mask(),
                        CollectionKind::Zones => editor.add_zone(),
                        CollectionKind::ObjectMasks => editor.add_object_mask(),
                    }
                }
            }
            ListAction::Edit(target) => self.report(|editor| editor.select(target)),
            ListAction::Remove(target) => self.report(|editor| editor.remove(&target)),
            ListAction::AddTo(name) => self.report(|editor| editor.append_object_mask(&name)),
        }
    }

    fn report<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Editor) -> Result<(), crate::editor::EditorError>,
    {
        if let Some(editor) = self.editor.as_mut() {
            if let Err(e) = edit(editor) {
                log::warn!("{}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    fn undo(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            if editor.undo() {
                log::info!("Undo");
            }
        }
    }

    fn redo(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            if editor.redo() {
                log::info!("Redo");
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Config...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Configuration", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.camera = None;
                            self.load_config_file(path, ctx);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Open Snapshot...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp"])
                            .pick_file()
                        {
                            self.settings.snapshot = Some(path.clone());
                            self.load_snapshot_file(path, ctx);
                        }
                        ui.close_menu();
                    }
                    let can_reload = self.api.is_some();
                    if ui.add_enabled(can_reload, egui::Button::new("Reload from NVR")).clicked() {
                        self.fetch_config(ctx);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let can_undo = self.editor.as_ref().is_some_and(Editor::can_undo);
                    if ui.add_enabled(can_undo, egui::Button::new("Undo (Ctrl+Z)")).clicked() {
                        self.undo();
                        ui.close_menu();
                    }
                    let can_redo = self.editor.as_ref().is_some_and(Editor::can_redo);
                    if ui.add_enabled(can_redo, egui::Button::new("Redo (Ctrl+Shift+Z)")).clicked() {
                        self.redo();
                        ui.close_menu();
                    }
                });

                if let Some(config) = &self.config {
                    let current = self.camera.clone().unwrap_or_default();
                    let mut chosen = None;
                    ui.menu_button("Camera", |ui| {
                        for name in config.cameras.keys() {
                            if ui.selectable_label(*name == current, name.as_str()).clicked() {
                                chosen = Some(name.clone());
                                ui.close_menu();
                            }
                        }
                    });
                    if let Some(name) = chosen {
                        self.open_camera(Some(&name), ctx);
                    }
                }

                ui.menu_button("View", |ui| {
                    let can_fetch = self.api.is_some();
                    let label = self.catalog.text("Storage");
                    if ui.add_enabled(can_fetch, egui::Button::new(label)).clicked() {
                        self.show_storage = true;
                        self.fetch_storage(ctx);
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.modifiers.command && !i.modifiers.shift && i.key_pressed(egui::Key::Z)) {
            self.undo();
        }
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.redo();
        }
    }

    fn messages(&mut self, ui: &mut egui::Ui) {
        if let Some(success) = &self.success {
            ui.colored_label(egui::Color32::from_rgb(34, 197, 94), success.as_str());
        }
        if let Some(error) = self.error.clone() {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(239, 68, 68), error);
                if ui.small_button("✖").clicked() {
                    self.error = None;
                }
            });
        }
        for warning in &self.warnings {
            ui.colored_label(egui::Color32::from_rgb(234, 179, 8), warning.as_str());
        }
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &self.camera {
                Some(camera) => ui.label(camera.as_str()),
                None => ui.label("No camera loaded"),
            };
            let now = Utc::now();
            if let Some(at) = self.config_loaded_at {
                ui.separator();
                let when = time_ago(at.timestamp_millis(), now).describe(&self.catalog, false);
                ui.label(self.catalog.format("Configuration loaded {when}", &[("when", when.as_str())]));
            }
            if let Some(at) = self.saved_at {
                ui.separator();
                let when = time_ago(at.timestamp_millis(), now).describe(&self.catalog, false);
                ui.label(self.catalog.format("Saved {when}", &[("when", when.as_str())]));
            }
        });
    }
}

impl eframe::App for MaskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background(ctx);
        self.keyboard_shortcuts(ctx);
        self.menu_bar(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.status_bar(ui));
        // Keep relative times ticking
        ctx.request_repaint_after(Duration::from_secs(1));

        let mut list_actions = Vec::new();
        egui::SidePanel::right("mask_values")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let Some(editor) = &self.editor else {
                        ui.label("Open a configuration to begin editing");
                        return;
                    };
                    let can_save = self.api.is_some();
                    for kind in CollectionKind::ALL {
                        list_actions.push(mask_values::show(ui, &self.catalog, kind, editor, can_save));
                        ui.add_space(12.0);
                    }
                });
            });
        for action in list_actions {
            self.handle_list_action(action, ctx);
        }

        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(camera) = &self.camera {
                    ui.heading(format!("{} {}", camera, self.catalog.text("Mask & Zone creator")));
                    ui.label(self.catalog.format(
                        "This tool can help you create masks & zones for your {camera} camera.",
                        &[("camera", camera.as_str())],
                    ));
                    ui.label(self.catalog.format(
                        "When done, copy each mask configuration into your {file} file restart your instance to save your changes.",
                        &[("file", "config.yml")],
                    ));
                }
                self.messages(ui);

                if let Some(message) = &self.loading_message {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(message.as_str());
                    });
                }

                let Some(editor) = self.editor.as_mut() else {
                    return canvas::CanvasAction::None;
                };
                let mut snap = editor.snap();
                if toolbar::show(ui, &self.catalog, editor.target(), &mut snap) {
                    editor.set_snap(snap);
                    log::info!("Snap to edges {}", if snap { "enabled" } else { "disabled" });
                }
                ui.separator();
                canvas::show(ui, editor, self.image_texture.as_ref())
            })
            .inner;
        self.handle_canvas_action(canvas_action);

        if self.show_storage {
            let mut open = true;
            egui::Window::new(self.catalog.text("Storage"))
                .open(&mut open)
                .show(ctx, |ui| {
                    storage::show(ui, &self.catalog, self.stats.as_ref(), self.storage.as_ref());
                });
            self.show_storage = open;
        }

        let mut dismiss = false;
        if let Some(text) = self.clipboard.pending_text() {
            let mut text = text.to_string();
            egui::Window::new("Copy manually").show(ctx, |ui| {
                ui.add(egui::TextEdit::multiline(&mut text).code_editor().desired_width(f32::INFINITY));
                dismiss = ui.button("Done").clicked();
            });
        }
        if dismiss {
            self.clipboard.dismiss_pending();
        }
    }
}
