//! Application state module

mod viewport;

pub use viewport::ViewportState;
