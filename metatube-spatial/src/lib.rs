//! Spatial data structures for metatube extraction.
//!
//! This crate provides the spatial-locality pieces of the extraction
//! pipeline:
//!
//! - [`VoxelCoord`] - Integer voxel coordinates from floor-discretized
//!   world positions
//! - [`DedupGrid`] - Voxel-hash deduplication of streamed surface
//!   vertices
//! - [`PointIndex`] - Narrow nearest-neighbor capability trait, with
//!   [`BruteForceIndex`] as the in-repo reference implementation
//!
//! # Coordinate Systems
//!
//! World coordinates are continuous `f64` values; voxel coordinates are
//! discrete `i64` values obtained by floor-dividing by a cell size, so
//! negative world coordinates map correctly (`-0.1` lands in cell `-1`,
//! not cell `0`).
//!
//! # Example
//!
//! ```
//! use metatube_spatial::DedupGrid;
//! use nalgebra::{Point3, Vector3};
//!
//! let mut grid = DedupGrid::new(0.5).unwrap();
//! assert!(grid.insert(Point3::origin(), Vector3::z()));
//! // A near-duplicate within tolerance is rejected
//! assert!(!grid.insert(Point3::new(0.1, 0.0, 0.0), Vector3::z()));
//! assert_eq!(grid.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod dedup;
mod error;
mod index;
mod voxel;

pub use dedup::DedupGrid;
pub use error::{SpatialError, SpatialResult};
pub use index::{BruteForceIndex, PointIndex};
pub use voxel::VoxelCoord;
