//! Nearest-neighbor capability trait.

use nalgebra::Point3;

use crate::error::{SpatialError, SpatialResult};

/// Nearest-neighbor queries over a fixed point set.
///
/// The MLS projector needs only these two queries, so the external
/// nearest-neighbor library is modeled as this narrow interface. Tests
/// and small clouds use [`BruteForceIndex`]; a k-d tree implementation
/// can be dropped in without touching the projector.
pub trait PointIndex {
    /// The indexed points, in the order they were supplied.
    fn points(&self) -> &[Point3<f64>];

    /// The `k` nearest points to `query`, as `(index, distance)` pairs
    /// sorted by ascending distance.
    fn k_nearest(&self, query: &Point3<f64>, k: usize) -> Vec<(usize, f64)>;

    /// All points within `radius` of `query`, as `(index, distance)`
    /// pairs in no particular order.
    fn within_radius(&self, query: &Point3<f64>, radius: f64) -> Vec<(usize, f64)>;

    /// The single nearest point to `query`, if the set is non-empty.
    fn nearest(&self, query: &Point3<f64>) -> Option<(usize, f64)> {
        self.k_nearest(query, 1).into_iter().next()
    }
}

/// O(n) linear-scan implementation of [`PointIndex`].
///
/// Adequate for the cloud sizes produced by one trajectory window scan
/// and for tests; no build cost, no external dependency.
///
/// # Example
///
/// ```
/// use metatube_spatial::{BruteForceIndex, PointIndex};
/// use nalgebra::Point3;
///
/// let index = BruteForceIndex::new(vec![
///     Point3::origin(),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// ]).unwrap();
///
/// let (idx, dist) = index.nearest(&Point3::new(0.9, 0.0, 0.0)).unwrap();
/// assert_eq!(idx, 1);
/// assert!(dist < 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct BruteForceIndex {
    points: Vec<Point3<f64>>,
}

impl BruteForceIndex {
    /// Build an index over the given points.
    ///
    /// # Errors
    ///
    /// Returns an error if the point set is empty.
    pub fn new(points: Vec<Point3<f64>>) -> SpatialResult<Self> {
        if points.is_empty() {
            return Err(SpatialError::TooFewPoints {
                min: 1,
                actual: 0,
            });
        }
        Ok(Self { points })
    }
}

impl PointIndex for BruteForceIndex {
    fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    fn k_nearest(&self, query: &Point3<f64>, k: usize) -> Vec<(usize, f64)> {
        let mut distances: Vec<(usize, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, (p - query).norm()))
            .collect();
        distances.sort_by(|a, b| a.1.total_cmp(&b.1));
        distances.truncate(k);
        distances
    }

    fn within_radius(&self, query: &Point3<f64>, radius: f64) -> Vec<(usize, f64)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let dist = (p - query).norm();
                (dist <= radius).then_some((i, dist))
            })
            .collect()
    }
}
