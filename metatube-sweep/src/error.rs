//! Error types for metatube extraction.

use thiserror::Error;

use metatube_io::WriteError;
use metatube_mls::MlsError;
use metatube_spatial::SpatialError;

/// Result type for extraction operations.
pub type SweepResult<T> = Result<T, SweepError>;

/// Errors that can occur during metatube extraction and export.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Window scan stride must be at least 1.
    #[error("invalid window stride: {0}")]
    InvalidStride(usize),

    /// Indexing the extraction point cloud failed.
    #[error("point cloud indexing failed: {0}")]
    Index(#[from] SpatialError),

    /// Building the MLS surface over the extraction cloud failed.
    #[error("MLS surface construction failed: {0}")]
    Mls(#[from] MlsError),

    /// Writing the exported mesh failed.
    #[error("mesh export failed: {0}")]
    Export(#[from] WriteError),
}
