//! Collaborator abstractions for the render loop
//!
//! The loop itself never touches the GPU or the windowing system; it talks to
//! a drawing surface, a rendering engine and a frame scheduler through these
//! traits.

use spot_core::SceneGraph;

use crate::camera::PerspectiveCamera;
use crate::error::RenderError;

/// A drawing surface with a backing buffer and a displayed (layout) size
pub trait RenderSurface {
    /// Size of the pixel storage the engine draws into
    fn backing_size(&self) -> (u32, u32);

    /// Size the surface currently occupies on screen
    fn display_size(&self) -> (u32, u32);

    /// Reallocate the backing buffer at exactly `width` x `height`
    fn resize_backing(&mut self, width: u32, height: u32);
}

/// Draws a scene from a camera onto a surface
pub trait RenderEngine<S: RenderSurface> {
    /// Draw one frame
    fn render(
        &mut self,
        surface: &mut S,
        scene: &SceneGraph,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderError>;
}

/// Host primitive that runs the loop again on the next display refresh
pub trait FrameScheduler {
    /// Request exactly one more frame
    fn request_frame(&self);
}
