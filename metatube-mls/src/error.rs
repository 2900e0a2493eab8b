//! Error types for MLS projection.

use thiserror::Error;

/// Result type for MLS operations.
pub type MlsResult<T> = Result<T, MlsError>;

/// Errors that can occur when building a point-set surface.
#[derive(Debug, Error)]
pub enum MlsError {
    /// The point cloud is too small to estimate a sample spacing.
    #[error("point-set surface needs at least {min} points, got {actual}")]
    TooFewPoints {
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },

    /// Bandwidth multiplier must be positive and finite.
    #[error("invalid bandwidth multiplier: {0}")]
    InvalidBandwidth(f64),
}
