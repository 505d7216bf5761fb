//! GPU side of the viewport

use spot_renderer::{RenderTarget, SceneRenderer, ViewportConfig};

use crate::session::Session;

/// Egui registration of the render target's color texture
struct RegisteredTexture {
    id: egui::TextureId,
    generation: u64,
}

/// Render target and scene renderer for the 3D viewport
pub struct ViewportState {
    pub target: RenderTarget,
    pub renderer: SceneRenderer,
    render_state: egui_wgpu::RenderState,
    texture: Option<RegisteredTexture>,
}

impl ViewportState {
    /// Create the target and upload the session's scene
    pub fn new(
        render_state: &egui_wgpu::RenderState,
        session: &Session,
        viewport: ViewportConfig,
    ) -> Self {
        let device = render_state.device.clone();
        let queue = render_state.queue.clone();
        let format = render_state.target_format;

        let renderer = SceneRenderer::new(device.clone(), queue, format, &session.scene, viewport);
        let target = RenderTarget::new(device, format, 1, 1);

        Self {
            target,
            renderer,
            render_state: render_state.clone(),
            texture: None,
        }
    }

    /// Texture id showing the target's current color texture
    ///
    /// The egui registration is updated whenever the target reallocated its
    /// textures since the last call.
    pub fn texture_id(&mut self) -> egui::TextureId {
        let generation = self.target.generation();
        let mut egui_renderer = self.render_state.renderer.write();

        match &mut self.texture {
            Some(texture) if texture.generation == generation => texture.id,
            Some(texture) => {
                egui_renderer.update_egui_texture_from_wgpu_texture(
                    &self.render_state.device,
                    self.target.color_view(),
                    wgpu::FilterMode::Linear,
                    texture.id,
                );
                texture.generation = generation;
                texture.id
            }
            None => {
                let id = egui_renderer.register_native_texture(
                    &self.render_state.device,
                    self.target.color_view(),
                    wgpu::FilterMode::Linear,
                );
                self.texture = Some(RegisteredTexture { id, generation });
                id
            }
        }
    }
}
