//! UI panels

mod controls;
mod viewport;

pub use controls::{ControlsPanel, hex_to_srgb, srgb_to_hex};
pub use viewport::{ViewportPanel, display_size};
