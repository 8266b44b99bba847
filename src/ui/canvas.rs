// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the camera snapshot and the edited polygon.
//!
//! The snapshot is fitted into the available space. Pointer positions are
//! converted to natural (detect resolution) pixels through the current
//! display scale, which is recomputed every frame so window resizes are
//! picked up immediately.

use crate::editor::Editor;
use crate::util::geometry::{canvas_to_natural, display_scale, natural_to_canvas, MASK_INSET};

/// Radius of a point handle, in screen points.
const HANDLE_RADIUS: f32 = 10.0;

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    None,
    /// Primary click on the surface, in natural coordinates.
    AddPoint(f64, f64),
    StartDragging(usize),
    /// Pointer position of a drag, in natural coordinates.
    DragPoint(usize, f64, f64),
    StopDragging,
    RemovePoint(usize),
}

/// Largest rect with the given aspect ratio that fits into `available`
/// after leaving `inset` on every side, centered.
pub fn fit_rect(available: egui::Rect, aspect: f32, inset: f32) -> egui::Rect {
    let inner = available.shrink(inset);
    if inner.width() <= 0.0 || inner.height() <= 0.0 || aspect <= 0.0 {
        return egui::Rect::from_center_size(available.center(), egui::Vec2::ZERO);
    }
    let size = if aspect > inner.width() / inner.height() {
        // Wider than the space: fit to width
        egui::vec2(inner.width(), inner.width() / aspect)
    } else {
        egui::vec2(inner.height() * aspect, inner.height())
    };
    egui::Rect::from_center_size(inner.center(), size)
}

/// Pointer state of one point handle during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct HandleGesture {
    drag_started: bool,
    dragged: bool,
    drag_stopped: bool,
    secondary_clicked: bool,
}

impl HandleGesture {
    fn from_response(response: &egui::Response) -> Self {
        Self {
            drag_started: response.drag_started(),
            dragged: response.dragged(),
            drag_stopped: response.drag_stopped(),
            secondary_clicked: response.secondary_clicked(),
        }
    }
}

/// Action for handle `index`. `pointer` is the pointer in natural coordinates.
fn handle_action(index: usize, gesture: HandleGesture, pointer: Option<(f64, f64)>) -> CanvasAction {
    if gesture.drag_started {
        CanvasAction::StartDragging(index)
    } else if gesture.dragged {
        match pointer {
            Some((x, y)) => CanvasAction::DragPoint(index, x, y),
            None => CanvasAction::None,
        }
    } else if gesture.drag_stopped {
        CanvasAction::StopDragging
    } else if gesture.secondary_clicked {
        CanvasAction::RemovePoint(index)
    } else {
        CanvasAction::None
    }
}

/// Action for a click on the surface, used when no handle claimed the pointer.
fn surface_action(handled: CanvasAction, primary_click: Option<(f64, f64)>) -> CanvasAction {
    match (handled, primary_click) {
        (CanvasAction::None, Some((x, y))) => CanvasAction::AddPoint(x, y),
        (handled, _) => handled,
    }
}

/// The dragged handle stays hidden so it doesn't cover the pointer.
fn handle_painted(index: usize, dragging: Option<usize>) -> bool {
    dragging != Some(index)
}

/// Natural coordinates of a screen position over `image_rect`.
fn to_natural(pos: egui::Pos2, image_rect: egui::Rect, scale: f32) -> (f64, f64) {
    canvas_to_natural(pos.x - image_rect.min.x, pos.y - image_rect.min.y, scale)
}

/// Display the canvas and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    editor: &Editor,
    image_texture: Option<&egui::TextureHandle>,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    let (width, height) = editor.dimensions();

    let available = ui.available_rect_before_wrap();
    let aspect = match image_texture {
        Some(texture) => texture.aspect_ratio(),
        None => width as f32 / height.max(1) as f32,
    };
    let image_rect = fit_rect(available, aspect, MASK_INSET as f32);
    let scale = display_scale(image_rect.width(), width);

    // The interactive surface reaches past the image so edge points stay grabbable.
    let surface_rect = image_rect.expand(MASK_INSET as f32);
    let surface = ui.allocate_rect(surface_rect, egui::Sense::click());

    let painter = ui.painter_at(available);
    match image_texture {
        Some(texture) => {
            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.rect_filled(image_rect, 0.0, egui::Color32::from_gray(60));
            painter.text(
                image_rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("{} x {}", width, height),
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(160),
            );
        }
    }

    let points: Vec<egui::Pos2> = editor
        .editing_polygon()
        .map(|polygon| {
            polygon
                .points()
                .iter()
                .map(|p| {
                    let (x, y) = natural_to_canvas(p, scale);
                    image_rect.min + egui::vec2(x, y)
                })
                .collect()
        })
        .unwrap_or_default();

    if points.len() > 1 {
        painter.add(egui::Shape::closed_line(
            points.clone(),
            egui::Stroke::new(3.0, egui::Color32::from_rgba_unmultiplied(244, 0, 0, 160)),
        ));
    }

    // Handles are registered after the surface so they win pointer hits.
    let canvas_id = ui.id().with("mask_canvas");
    for (i, point) in points.iter().enumerate() {
        let handle_rect = egui::Rect::from_center_size(*point, egui::Vec2::splat(HANDLE_RADIUS * 2.0));
        let handle = ui.interact(handle_rect, canvas_id.with(i), egui::Sense::click_and_drag());

        let pointer = ui
            .ctx()
            .pointer_interact_pos()
            .map(|pos| to_natural(pos, image_rect, scale));
        let handled = handle_action(i, HandleGesture::from_response(&handle), pointer);
        if handled != CanvasAction::None {
            action = handled;
        }

        if handle_painted(i, editor.dragging()) {
            painter.circle_filled(*point, HANDLE_RADIUS, egui::Color32::from_gray(20));
            painter.circle_stroke(*point, HANDLE_RADIUS, egui::Stroke::new(1.0, egui::Color32::WHITE));
        }
    }

    let primary_click = surface
        .clicked()
        .then(|| surface.interact_pointer_pos())
        .flatten()
        .map(|pos| to_natural(pos, image_rect, scale));
    surface_action(action, primary_click)
}
