//! Error types for spatial structures.

use thiserror::Error;

/// Result type for spatial operations.
pub type SpatialResult<T> = Result<T, SpatialError>;

/// Errors that can occur in spatial structures.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Cell size must be positive and finite.
    #[error("invalid cell size: {0}")]
    InvalidCellSize(f64),

    /// A point index was built over an empty point set.
    #[error("point index requires at least {min} points, got {actual}")]
    TooFewPoints {
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },
}
