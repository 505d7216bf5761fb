//! Offscreen render target
//!
//! The viewport draws into this target and the GUI displays the color texture.
//! The backing size is the size of the textures; the display size is whatever
//! the layout gave the viewport this frame.

use std::sync::Arc;

use crate::traits::RenderSurface;

/// Depth buffer format
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Color and depth textures with a displayed size
pub struct RenderTarget {
    device: Arc<wgpu::Device>,
    format: wgpu::TextureFormat,
    #[allow(dead_code)]
    color_texture: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    backing_size: (u32, u32),
    display_size: (u32, u32),
    generation: u64,
}

impl RenderTarget {
    /// Create a target with the given backing size
    pub fn new(
        device: Arc<wgpu::Device>,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let (color_texture, color_view, depth_view) =
            create_textures(&device, format, width, height);
        Self {
            device,
            format,
            color_texture,
            color_view,
            depth_view,
            backing_size: (width, height),
            display_size: (width, height),
            generation: 0,
        }
    }

    /// Record the size the layout allocated for the viewport
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.display_size = (width, height);
    }

    /// Color attachment view
    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    /// Depth attachment view
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Whether the backing buffer has no pixels
    pub fn is_empty(&self) -> bool {
        self.backing_size.0 == 0 || self.backing_size.1 == 0
    }

    /// Incremented whenever the textures are reallocated
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RenderSurface for RenderTarget {
    fn backing_size(&self) -> (u32, u32) {
        self.backing_size
    }

    fn display_size(&self) -> (u32, u32) {
        self.display_size
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        let (color_texture, color_view, depth_view) =
            create_textures(&self.device, self.format, width, height);
        self.color_texture = color_texture;
        self.color_view = color_view;
        self.depth_view = depth_view;
        self.backing_size = (width, height);
        self.generation += 1;
    }
}

// wgpu rejects zero-sized textures, so allocation is clamped to 1x1 while the
// reported backing size stays at what was requested.
fn create_textures(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView, wgpu::TextureView) {
    let size = wgpu::Extent3d {
        width: width.max(1),
        height: height.max(1),
        depth_or_array_layers: 1,
    };

    let color_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Viewport Color Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let color_view = color_texture.create_view(&wgpu::TextureViewDescriptor::default());

    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Viewport Depth Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

    (color_texture, color_view, depth_view)
}
