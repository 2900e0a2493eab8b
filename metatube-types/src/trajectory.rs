//! Trajectory of an oriented ellipsoidal particle.

use nalgebra::{Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TrajectoryError, TrajectoryResult};
use crate::Aabb;

/// An ordered sequence of ellipsoid samples.
///
/// Positions and orientations are index-aligned; the semi-axis triple
/// is shared by the whole trajectory. The data is immutable once
/// constructed and is owned by the caller for the full duration of
/// extraction.
///
/// # Example
///
/// ```
/// use metatube_types::Trajectory;
/// use nalgebra::{Point3, UnitQuaternion, Vector3};
///
/// let positions = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
/// let orientations = vec![UnitQuaternion::identity(); 2];
///
/// let traj = Trajectory::new(positions, orientations, Vector3::new(3.0, 2.0, 1.0)).unwrap();
/// assert_eq!(traj.mean_radius(), 2.0);
/// assert_eq!(traj.max_semi_axis(), 3.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trajectory {
    positions: Vec<Point3<f64>>,
    orientations: Vec<UnitQuaternion<f64>>,
    axes: Vector3<f64>,
}

impl Trajectory {
    /// Assemble a trajectory from index-aligned samples.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than 2 samples are provided
    /// - Positions and orientations differ in length
    /// - Any semi-axis length is zero, negative or non-finite
    pub fn new(
        positions: Vec<Point3<f64>>,
        orientations: Vec<UnitQuaternion<f64>>,
        axes: Vector3<f64>,
    ) -> TrajectoryResult<Self> {
        if positions.len() != orientations.len() {
            return Err(TrajectoryError::LengthMismatch {
                positions: positions.len(),
                orientations: orientations.len(),
            });
        }
        if positions.len() < 2 {
            return Err(TrajectoryError::TooFewSamples {
                min: 2,
                actual: positions.len(),
            });
        }
        for &axis in &[axes.x, axes.y, axes.z] {
            if axis <= 0.0 || !axis.is_finite() {
                return Err(TrajectoryError::InvalidAxis(axis));
            }
        }

        Ok(Self {
            positions,
            orientations,
            axes,
        })
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the trajectory has no samples.
    ///
    /// Always false for a successfully constructed trajectory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sample positions, in time order.
    #[must_use]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Sample orientations, index-aligned with [`positions`](Self::positions).
    #[must_use]
    pub fn orientations(&self) -> &[UnitQuaternion<f64>] {
        &self.orientations
    }

    /// The ellipsoid semi-axis lengths shared by all samples.
    #[must_use]
    pub fn axes(&self) -> Vector3<f64> {
        self.axes
    }

    /// Mean of the three semi-axis lengths.
    ///
    /// Drives the cross-section radius of the tube tessellation.
    #[must_use]
    pub fn mean_radius(&self) -> f64 {
        (self.axes.x + self.axes.y + self.axes.z) / 3.0
    }

    /// Longest semi-axis length.
    #[must_use]
    pub fn max_semi_axis(&self) -> f64 {
        self.axes.x.max(self.axes.y).max(self.axes.z)
    }

    /// Shortest semi-axis length.
    #[must_use]
    pub fn min_semi_axis(&self) -> f64 {
        self.axes.x.min(self.axes.y).min(self.axes.z)
    }

    /// The origin-centered reference bounding box of one ellipsoid.
    ///
    /// Sized to the longest semi-axis scaled by 1.25, so a rotated
    /// ellipsoid stays enclosed with margin. Translated per sample to
    /// obtain trajectory bounding boxes for overlap pruning.
    #[must_use]
    pub fn reference_box(&self) -> Aabb {
        Aabb::centered_cube(self.max_semi_axis() * 1.25)
    }

    /// The reference box translated to the sample at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn sample_box(&self, index: usize) -> Aabb {
        self.reference_box().translated(self.positions[index].coords)
    }
}
