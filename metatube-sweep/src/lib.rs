//! Swept-ellipsoid metatube surface extraction.
//!
//! A metatube is the volume swept by an oriented ellipsoid along a
//! discrete trajectory, represented implicitly as the union of one
//! quadric per sample. This crate turns such a trajectory into a
//! triangle mesh:
//!
//! 1. [`RigidQuadric`] carries the ellipsoid's quadratic form to each
//!    sample pose.
//! 2. [`MetatubeField`] exposes the union as a [`ScalarField`],
//!    restricted to a sliding window of samples so extraction stays
//!    linear in trajectory length.
//! 3. A [`SurfaceExtractor`] backend scan-converts each window into
//!    surface vertices, deduplicated into a point cloud.
//! 4. [`tessellate_tube_mls`] sweeps a ring tube along the trajectory
//!    and projects it onto the cloud's moving-least-squares surface;
//!    [`tessellate_tube`] is the direct variant without projection.
//!
//! [`extract_metatube`] and [`export_metatube`] tie the stages
//! together; [`export_batch`] runs them over many trajectories with
//! per-trajectory failure isolation.
//!
//! # Example
//!
//! ```
//! use metatube_sweep::{extract_metatube, ExportMode, ExtractionParams};
//! use metatube_types::Trajectory;
//! use nalgebra::{Point3, UnitQuaternion, Vector3};
//!
//! let positions = vec![
//!     Point3::origin(),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//! ];
//! let orientations = vec![UnitQuaternion::identity(); 3];
//! let traj = Trajectory::new(positions, orientations, Vector3::new(1.0, 1.0, 1.0)).unwrap();
//!
//! let mesh = extract_metatube(
//!     &traj,
//!     &ExtractionParams::default(),
//!     &mut ExportMode::Approximate,
//! )
//! .unwrap();
//! assert!(mesh.triangle_count() > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod extract;
mod field;
mod quadric;
mod tube;

pub use error::{SweepError, SweepResult};
pub use extract::{
    export_batch, export_metatube, extract_metatube, ExportMode, ExtractionParams,
    SurfaceExtractor, VertexSink,
};
pub use field::{MetatubeField, ScalarField};
pub use quadric::{orientation_axis_angle, RigidQuadric};
pub use tube::{tessellate_tube, tessellate_tube_mls, RING_SEGMENTS};
