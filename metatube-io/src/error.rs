//! Error types for mesh writing.

use thiserror::Error;

/// Result type for mesh writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Errors that can occur while writing a mesh.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Position and normal arrays differ in length.
    #[error("mesh has {positions} positions but {normals} normals")]
    LengthMismatch {
        /// Number of vertex positions.
        positions: usize,
        /// Number of vertex normals.
        normals: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
