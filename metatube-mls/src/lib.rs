//! Moving-least-squares surface projection.
//!
//! A [`PointSetSurface`] treats a point cloud as an implicit surface
//! and projects arbitrary query points onto it by iteratively fitting
//! weighted local planes:
//!
//! 1. Seed the iterate at the cloud point nearest the query.
//! 2. Gather neighbors within the bandwidth `h`, weight them with a
//!    compactly-supported Wendland kernel.
//! 3. Fit a plane through the weighted mean with the weighted
//!    covariance's smallest-eigenvalue eigenvector as normal.
//! 4. Project the original query onto that plane; repeat until the
//!    iterate stops moving.
//!
//! The nearest-neighbor structure is supplied through the
//! [`PointIndex`](metatube_spatial::PointIndex) capability trait, so
//! small clouds and tests can use a brute-force scan while production
//! callers plug in a k-d tree.
//!
//! # Example
//!
//! ```
//! use metatube_mls::PointSetSurface;
//! use metatube_spatial::BruteForceIndex;
//! use nalgebra::{Point3, Vector3};
//!
//! // A flat grid of points in the z = 0 plane
//! let mut points = Vec::new();
//! for i in 0..20 {
//!     for j in 0..20 {
//!         points.push(Point3::new(f64::from(i) * 0.1, f64::from(j) * 0.1, 0.0));
//!     }
//! }
//! let index = BruteForceIndex::new(points).unwrap();
//! let surface = PointSetSurface::new(index, 5.0).unwrap();
//!
//! let projected = surface.project(&Point3::new(1.0, 1.0, 0.5), Some(&Vector3::z()));
//! assert!(projected.supported);
//! assert!(projected.position.z.abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod surface;

pub use error::{MlsError, MlsResult};
pub use surface::{wendland, PointSetSurface, Projection};
