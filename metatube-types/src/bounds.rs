//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Used by the extraction pipeline purely for overlap pruning of
/// per-sample ellipsoid bounds against a local sampling region, never
/// for exact containment of the ellipsoid itself.
///
/// # Example
///
/// ```
/// use metatube_types::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from minimum and maximum corners.
    ///
    /// The corners are automatically corrected if min > max for any axis.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create a cube of half-extent `half` centered at the origin.
    ///
    /// # Example
    ///
    /// ```
    /// use metatube_types::Aabb;
    ///
    /// let aabb = Aabb::centered_cube(2.0);
    /// assert_eq!(aabb.min.x, -2.0);
    /// assert_eq!(aabb.max.z, 2.0);
    /// ```
    #[must_use]
    pub fn centered_cube(half: f64) -> Self {
        Self {
            min: Point3::new(-half, -half, -half),
            max: Point3::new(half, half, half),
        }
    }

    /// Return this box translated by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Snap this box outward to a grid of the given cell size.
    ///
    /// The minimum corner is floored and the maximum corner is ceiled
    /// to multiples of `cell_size`, so the result always encloses the
    /// original box and its corners lie on the sampling lattice.
    ///
    /// # Example
    ///
    /// ```
    /// use metatube_types::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::new(Point3::new(0.3, 0.3, 0.3), Point3::new(1.1, 1.1, 1.1));
    /// let snapped = aabb.discretized(0.5);
    /// assert_eq!(snapped.min, Point3::new(0.0, 0.0, 0.0));
    /// assert_eq!(snapped.max, Point3::new(1.5, 1.5, 1.5));
    /// ```
    #[must_use]
    pub fn discretized(&self, cell_size: f64) -> Self {
        Self {
            min: Point3::new(
                (self.min.x / cell_size).floor() * cell_size,
                (self.min.y / cell_size).floor() * cell_size,
                (self.min.z / cell_size).floor() * cell_size,
            ),
            max: Point3::new(
                (self.max.x / cell_size).ceil() * cell_size,
                (self.max.y / cell_size).ceil() * cell_size,
                (self.max.z / cell_size).ceil() * cell_size,
            ),
        }
    }

    /// Check whether this box overlaps another.
    ///
    /// Uses strict inequalities: boxes that merely share a face do not
    /// count as overlapping.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Check whether a point lies inside this box (boundary inclusive).
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Size of the box along each axis.
    #[must_use]
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }
}
