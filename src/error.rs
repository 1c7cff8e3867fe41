//! Library error type for neural-enlarge.
//!
//! The one failure path the rest of the program must treat as fatal is
//! `MissingWeights`: pre-trained weights were requested (not training)
//! and the conventionally named file is absent. Callers must stop —
//! there is no untrained fallback outside of training mode.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Pre-trained weights not found and training is disabled.
    #[error(
        "model file with pre-trained convolution layers not found at {}. Download it here: {url}",
        path.display()
    )]
    MissingWeights { path: PathBuf, url: String },

    /// Failed to load an image file.
    #[error("failed to load image from {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to save an image file.
    #[error("failed to save image to {}: {source}", path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The framework recorder could not read a weights file.
    #[error("failed to load weights from {}: {message}", path.display())]
    WeightLoad { path: PathBuf, message: String },

    /// The framework recorder could not write a weights file.
    #[error("failed to save weights to {}: {message}", path.display())]
    WeightSave { path: PathBuf, message: String },

    /// Tensor data could not be reshaped into an image array.
    #[error("tensor shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for neural-enlarge operations.
pub type Result<T> = std::result::Result<T, Error>;
