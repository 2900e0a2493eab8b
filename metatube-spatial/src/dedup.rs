//! Voxel-hash deduplication of streamed surface vertices.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use crate::error::{SpatialError, SpatialResult};
use crate::voxel::VoxelCoord;

/// Merges near-duplicate surface points streamed during a local
/// surface scan.
///
/// Neighboring extraction windows share boundaries, so the external
/// iso-surface extractor reports the same surface samples more than
/// once. The grid hashes each kept point into the voxel containing it
/// (cell size equal to the merge tolerance) and rejects a candidate if
/// that voxel or any of its 26 neighbors already holds a point within
/// the tolerance.
///
/// The grid has no notion of trajectory or time; its only state is the
/// kept point/normal arrays and the voxel-to-index map.
///
/// # Example
///
/// ```
/// use metatube_spatial::DedupGrid;
/// use nalgebra::{Point3, Vector3};
///
/// let mut grid = DedupGrid::new(0.25).unwrap();
/// assert!(grid.insert(Point3::origin(), Vector3::x()));
/// assert!(grid.insert(Point3::new(1.0, 0.0, 0.0), Vector3::x()));
/// // Within tolerance of the first point: discarded
/// assert!(!grid.insert(Point3::new(0.2, 0.0, 0.0), Vector3::x()));
/// assert_eq!(grid.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DedupGrid {
    tolerance: f64,
    positions: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    occupied: HashMap<VoxelCoord, usize>,
}

impl DedupGrid {
    /// Create an empty grid with the given merge tolerance.
    ///
    /// Callers typically pass half the extraction cell size.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not a positive finite
    /// number; it doubles as the voxel cell size, so zero or negative
    /// values would break the hashing.
    pub fn new(tolerance: f64) -> SpatialResult<Self> {
        if tolerance <= 0.0 || !tolerance.is_finite() {
            return Err(SpatialError::InvalidCellSize(tolerance));
        }
        Ok(Self {
            tolerance,
            positions: Vec::new(),
            normals: Vec::new(),
            occupied: HashMap::new(),
        })
    }

    /// Offer a candidate surface vertex.
    ///
    /// Returns `true` if the vertex was kept, `false` if an existing
    /// point within the tolerance made it a duplicate.
    pub fn insert(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> bool {
        let tol_sq = self.tolerance * self.tolerance;
        let center = VoxelCoord::from_point(&position, self.tolerance);

        if self.cell_has_match(center, &position, tol_sq) {
            return false;
        }
        for neighbor in center.all_neighbors() {
            if self.cell_has_match(neighbor, &position, tol_sq) {
                return false;
            }
        }

        self.positions.push(position);
        self.normals.push(normal);
        self.occupied.insert(center, self.positions.len() - 1);
        true
    }

    fn cell_has_match(&self, cell: VoxelCoord, position: &Point3<f64>, tol_sq: f64) -> bool {
        self.occupied
            .get(&cell)
            .is_some_and(|&idx| (position - self.positions[idx]).norm_squared() < tol_sq)
    }

    /// Number of kept points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no points have been kept yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Kept positions, in insertion order.
    #[must_use]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Kept normals, index-aligned with the positions.
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// Consume the grid, yielding the deduplicated point cloud.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point3<f64>>, Vec<Vector3<f64>>) {
        (self.positions, self.normals)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonpositive_tolerance() {
        assert!(matches!(
            DedupGrid::new(0.0),
            Err(SpatialError::InvalidCellSize(_))
        ));
        assert!(DedupGrid::new(f64::NAN).is_err());
    }

    #[test]
    fn keeps_distinct_points() {
        let mut grid = DedupGrid::new(0.1).unwrap();
        assert!(grid.insert(Point3::origin(), Vector3::z()));
        assert!(grid.insert(Point3::new(1.0, 0.0, 0.0), Vector3::z()));
        assert!(grid.insert(Point3::new(0.0, 1.0, 0.0), Vector3::z()));
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn rejects_duplicate_across_cell_boundary() {
        // Two points straddling a voxel boundary but within tolerance
        let mut grid = DedupGrid::new(0.5).unwrap();
        assert!(grid.insert(Point3::new(0.49, 0.0, 0.0), Vector3::z()));
        assert!(!grid.insert(Point3::new(0.51, 0.0, 0.0), Vector3::z()));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn rejects_duplicate_with_negative_coordinates() {
        let mut grid = DedupGrid::new(0.5).unwrap();
        assert!(grid.insert(Point3::new(-0.01, 0.0, 0.0), Vector3::z()));
        assert!(!grid.insert(Point3::new(0.01, 0.0, 0.0), Vector3::z()));
    }

    #[test]
    fn idempotent_on_already_separated_cloud() {
        // Points spaced beyond tolerance survive a second pass unchanged
        let tolerance = 0.25;
        let mut first = DedupGrid::new(tolerance).unwrap();
        for i in 0..10 {
            for j in 0..10 {
                let p = Point3::new(f64::from(i) * 0.3, f64::from(j) * 0.3, 0.0);
                first.insert(p, Vector3::z());
            }
        }
        let (positions, normals) = first.into_parts();
        assert_eq!(positions.len(), 100);

        let mut second = DedupGrid::new(tolerance).unwrap();
        for (p, n) in positions.iter().zip(normals.iter()) {
            assert!(second.insert(*p, *n));
        }
        assert_eq!(second.len(), positions.len());
    }

    #[test]
    fn into_parts_preserves_order() {
        let mut grid = DedupGrid::new(0.1).unwrap();
        grid.insert(Point3::origin(), Vector3::x());
        grid.insert(Point3::new(5.0, 0.0, 0.0), Vector3::y());
        let (positions, normals) = grid.into_parts();
        assert_eq!(positions[1].x, 5.0);
        assert_eq!(normals[0], Vector3::x());
        assert_eq!(normals[1], Vector3::y());
    }
}
