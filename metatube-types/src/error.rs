//! Error types for trajectory construction.

use thiserror::Error;

/// Result type for trajectory construction.
pub type TrajectoryResult<T> = Result<T, TrajectoryError>;

/// Errors that can occur when assembling a trajectory.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    /// Trajectory has too few samples for extraction.
    #[error("trajectory needs at least {min} samples, got {actual}")]
    TooFewSamples {
        /// Minimum required samples.
        min: usize,
        /// Actual sample count.
        actual: usize,
    },

    /// Position and orientation arrays differ in length.
    #[error("trajectory has {positions} positions but {orientations} orientations")]
    LengthMismatch {
        /// Number of position samples.
        positions: usize,
        /// Number of orientation samples.
        orientations: usize,
    },

    /// Semi-axis lengths must be positive and finite.
    #[error("invalid semi-axis length: {0}")]
    InvalidAxis(f64),
}
