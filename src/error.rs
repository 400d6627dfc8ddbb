//! Error types for uw-eval operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for uw-eval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during an evaluation run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to load or decode an image file.
    #[error("Image load failed: {path}: {reason}")]
    ImageLoad {
        /// Path to the image that failed to load.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Image dimensions don't match between ground-truth and generated images.
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height).
        expected: (usize, usize),
        /// Actual dimensions (width, height).
        actual: (usize, usize),
    },

    /// Failed to calculate a quality metric.
    #[error("Metric calculation failed: {metric}: {reason}")]
    MetricCalculation {
        /// Name of the metric that failed.
        metric: String,
        /// Reason for the failure.
        reason: String,
    },

    /// Error discovering images in a directory.
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
