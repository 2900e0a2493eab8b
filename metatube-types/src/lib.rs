//! Core data types for swept-ellipsoid surface extraction.
//!
//! This crate provides the foundational types shared by the metatube
//! extraction pipeline:
//!
//! - [`Trajectory`] - An ordered sequence of ellipsoid samples
//! - [`SweptMesh`] - The output triangle mesh with per-vertex normals
//! - [`Aabb`] - Axis-aligned bounding box used for overlap pruning
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Triangle winding is
//! **counter-clockwise (CCW) when viewed from outside**; normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use metatube_types::Trajectory;
//! use nalgebra::{Point3, UnitQuaternion, Vector3};
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//! ];
//! let orientations = vec![UnitQuaternion::identity(); 2];
//! let axes = Vector3::new(2.0, 1.0, 1.0);
//!
//! let traj = Trajectory::new(positions, orientations, axes).unwrap();
//! assert_eq!(traj.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod error;
mod mesh;
mod trajectory;

pub use bounds::Aabb;
pub use error::{TrajectoryError, TrajectoryResult};
pub use mesh::SweptMesh;
pub use trajectory::Trajectory;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
