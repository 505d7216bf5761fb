//! 3D viewport panel

use spot_renderer::FrameScheduler;

use crate::session::Session;
use crate::state::ViewportState;

/// Scroll points per zoom step
const SCROLL_PER_STEP: f32 = 50.0;

/// 3D viewport panel
#[derive(Default)]
pub struct ViewportPanel;

impl ViewportPanel {
    pub fn new() -> Self {
        Self
    }

    /// Fallback when no wgpu render state is available
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::hover());

        painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(30, 30, 30));
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            "3D Viewport\n(WebGPU not available)",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );
    }

    /// Track the panel size, apply orbit input and run this frame of the render loop
    pub fn ui_with_render_context(
        &mut self,
        ui: &mut egui::Ui,
        session: &mut Session,
        viewport_state: &mut ViewportState,
        scheduler: &dyn FrameScheduler,
    ) {
        let available_size = ui.available_size();
        let (rect, response) =
            ui.allocate_exact_size(available_size, egui::Sense::click_and_drag());

        let pixels_per_point = ui.ctx().pixels_per_point();
        let (width, height) = display_size(available_size, pixels_per_point);

        handle_input(ui, &response, session, pixels_per_point, height as f32);

        viewport_state.target.set_display_size(width, height);
        // Errors are logged by the loop and kept on the session
        let _ = session.frame(
            &mut viewport_state.target,
            &mut viewport_state.renderer,
            scheduler,
        );

        if let Some(error) = session.last_error() {
            let message = error.to_string();
            ui.painter().rect_filled(rect, 0.0, egui::Color32::from_rgb(30, 30, 30));
            ui.painter().text(
                rect.center() - egui::vec2(0.0, 16.0),
                egui::Align2::CENTER_CENTER,
                message,
                egui::FontId::proportional(14.0),
                egui::Color32::LIGHT_RED,
            );
            let button_rect = egui::Rect::from_center_size(
                rect.center() + egui::vec2(0.0, 16.0),
                egui::vec2(80.0, 24.0),
            );
            if ui.put(button_rect, egui::Button::new("Restart")).clicked() {
                session.start(scheduler);
            }
            return;
        }

        if width == 0 || height == 0 {
            return;
        }

        let texture_id = viewport_state.texture_id();
        ui.painter().image(
            texture_id,
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

/// Physical pixel size of a panel `size` points large
pub fn display_size(size: egui::Vec2, pixels_per_point: f32) -> (u32, u32) {
    let to_pixels = |points: f32| (points.max(0.0) * pixels_per_point).round() as u32;
    (to_pixels(size.x), to_pixels(size.y))
}

/// Primary drag orbits, secondary or middle drag pans, scroll zooms
fn handle_input(
    ui: &egui::Ui,
    response: &egui::Response,
    session: &mut Session,
    pixels_per_point: f32,
    height: f32,
) {
    let mut moved = false;

    if response.dragged_by(egui::PointerButton::Primary) {
        let delta = response.drag_delta() * pixels_per_point;
        session.controls.rotate(delta.x, delta.y, height);
        moved = true;
    }

    if response.dragged_by(egui::PointerButton::Secondary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        let delta = response.drag_delta() * pixels_per_point;
        session
            .controls
            .pan(&session.camera, delta.x, delta.y, height);
        moved = true;
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            session.controls.zoom(scroll / SCROLL_PER_STEP);
            moved = true;
        }
    }

    if moved {
        session.sync_controls();
    }
}
