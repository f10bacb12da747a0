//! Error types for reconscope.

use thiserror::Error;

/// The main error type for reconscope operations.
#[derive(Error, Debug)]
pub enum ReconstructionError {
    /// The camera handed to the adapter is not a perspective camera.
    #[error("camera of type '{0}' is not a perspective camera")]
    NotPerspective(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A point data array has an unsupported number of components.
    #[error("array '{name}' has {components} components, expected 1 to 4")]
    InvalidComponents { name: String, components: usize },

    /// Image decoding error.
    #[error("image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for reconscope operations.
pub type Result<T> = std::result::Result<T, ReconstructionError>;
