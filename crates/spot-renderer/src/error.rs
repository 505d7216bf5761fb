//! Renderer error types

/// Errors that stop a frame from being drawn
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The scene's objects no longer match what was uploaded to the GPU
    #[error("Scene changed after upload: expected {expected} objects, found {actual}")]
    SceneChanged {
        /// Objects uploaded at startup
        expected: usize,
        /// Objects in the scene now
        actual: usize,
    },
}

/// Texture loading errors
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The image could not be read or decoded
    #[error("Failed to load image '{path}': {message}")]
    Load {
        /// Image path
        path: String,
        /// Decoder message
        message: String,
    },
    /// The image has no pixels
    #[error("Image '{0}' is empty")]
    Empty(String),
}
