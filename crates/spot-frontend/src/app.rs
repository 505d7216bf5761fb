//! Main application module

use spot_core::TracingReporter;
use spot_renderer::FrameScheduler;

use crate::config::AppConfig;
use crate::panels::{ControlsPanel, ViewportPanel};
use crate::session::Session;
use crate::state::ViewportState;

/// Runs the next loop frame on egui's next repaint
pub struct RepaintScheduler {
    ctx: egui::Context,
}

impl RepaintScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&self) {
        self.ctx.request_repaint();
    }
}

/// Main application
pub struct SpotlightApp {
    session: Session,
    viewport_state: Option<ViewportState>,
    controls_panel: ControlsPanel,
    viewport_panel: ViewportPanel,
}

impl SpotlightApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut session = Session::new(&config, Box::new(TracingReporter));

        // Create viewport state if WGPU is available
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            ViewportState::new(render_state, &session, config.renderer.viewport.clone())
        });

        if viewport_state.is_some() {
            session.start(&RepaintScheduler::new(cc.egui_ctx.clone()));
        } else {
            tracing::warn!("No wgpu render state; the viewport will stay empty");
        }

        Self {
            session,
            viewport_state,
            controls_panel: ControlsPanel::new(),
            viewport_panel: ViewportPanel::new(),
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = if self.session.is_running() {
                    "Running"
                } else {
                    "Stopped"
                };
                ui.label(status);
                ui.separator();
                ui.label(format!("Frames: {}", self.session.frames()));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !self.controls_panel.is_open() && ui.small_button("Controls").clicked() {
                        self.controls_panel.reopen();
                    }
                });
            });
        });
    }
}

impl eframe::App for SpotlightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let scheduler = RepaintScheduler::new(ctx.clone());

        self.show_status_bar(ctx);

        // Control edits land before the viewport draws
        self.controls_panel.show(ctx, &mut self.session.panel);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| match &mut self.viewport_state {
                Some(viewport_state) => self.viewport_panel.ui_with_render_context(
                    ui,
                    &mut self.session,
                    viewport_state,
                    &scheduler,
                ),
                None => self.viewport_panel.ui(ui),
            });
    }
}
