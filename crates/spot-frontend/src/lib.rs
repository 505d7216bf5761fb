//! Spotlight demo frontend
//!
//! egui application showing the spot light scene with a live control panel.

pub mod app;
pub mod config;
pub mod panels;
pub mod session;
pub mod state;

// Re-exports for convenience
pub use app::{RepaintScheduler, SpotlightApp};
pub use config::{AppConfig, ConfigError, WindowConfig};
pub use session::Session;
