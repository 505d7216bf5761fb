//! Spotlight demo renderer
//!
//! Camera, orbit controls and the resize-aware render loop, plus the wgpu
//! engine that draws the scene.
//!
//! # Module Structure
//!
//! ```text
//! spot-renderer/
//! ├── traits.rs          # RenderSurface, RenderEngine, FrameScheduler
//! ├── render_loop.rs     # Self-rescheduling, resize-aware render loop
//! ├── camera.rs          # Perspective camera
//! ├── controls.rs        # Orbit controls
//! ├── config.rs          # Renderer configuration
//! ├── target.rs          # Offscreen render target (wgpu)
//! ├── texture.rs         # Material texture loading
//! ├── pipeline.rs        # Pipeline utilities
//! ├── vertex.rs          # Vertex formats
//! └── scene_renderer.rs  # Phong + helper line renderer (wgpu)
//! ```

pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod pipeline;
pub mod render_loop;
pub mod scene_renderer;
pub mod target;
pub mod texture;
pub mod traits;
pub mod vertex;

pub use camera::{CameraUniform, PerspectiveCamera};
pub use config::{CameraConfig, ControlsConfig, RendererConfig, ViewportConfig};
pub use controls::OrbitControls;
pub use error::{RenderError, TextureError};
pub use render_loop::{FrameInputs, FrameOutcome, LoopState, RenderLoop, resize_to_display};
pub use scene_renderer::SceneRenderer;
pub use target::RenderTarget;
pub use traits::{FrameScheduler, RenderEngine, RenderSurface};
pub use vertex::{LineVertex, MeshVertex};
