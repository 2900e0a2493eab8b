//! Voxel coordinate type.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A discrete 3D coordinate in voxel space.
///
/// Uses `i64` coordinates so the grid origin can sit anywhere in world
/// space and large trajectories stay in range. Coordinates are derived
/// by floor-dividing world positions by a cell size; the key is only
/// used for hashing during one extraction pass and is never persisted.
///
/// # Example
///
/// ```
/// use metatube_spatial::VoxelCoord;
/// use nalgebra::Point3;
///
/// let coord = VoxelCoord::from_point(&Point3::new(1.2, -0.1, 0.0), 0.5);
/// assert_eq!(coord, VoxelCoord::new(2, -1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelCoord {
    /// X cell index.
    pub x: i64,
    /// Y cell index.
    pub y: i64,
    /// Z cell index.
    pub z: i64,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Discretize a world position into the voxel containing it.
    ///
    /// Floor semantics: positions with negative coordinates land in
    /// negative cells rather than being truncated toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // coordinates stay far below i64 range
    pub fn from_point(position: &Point3<f64>, cell_size: f64) -> Self {
        Self {
            x: (position.x / cell_size).floor() as i64,
            y: (position.y / cell_size).floor() as i64,
            z: (position.z / cell_size).floor() as i64,
        }
    }

    /// Returns all 26 neighbors (Moore neighborhood).
    ///
    /// Face-adjacent (6), edge-adjacent (12) and corner-adjacent (8)
    /// neighbors, in a fixed scan order.
    #[must_use]
    pub fn all_neighbors(self) -> [Self; 26] {
        let mut result = [Self::default(); 26];
        let mut idx = 0;

        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                for dz in -1i64..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    result[idx] = Self::new(self.x + dx, self.y + dy, self.z + dz);
                    idx += 1;
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_point_positive() {
        let coord = VoxelCoord::from_point(&Point3::new(1.6, 0.4, 2.0), 0.5);
        assert_eq!(coord, VoxelCoord::new(3, 0, 4));
    }

    #[test]
    fn from_point_negative_uses_floor() {
        let coord = VoxelCoord::from_point(&Point3::new(-0.1, -0.6, -1.0), 0.5);
        assert_eq!(coord, VoxelCoord::new(-1, -2, -2));
    }

    #[test]
    fn all_neighbors_excludes_self() {
        let coord = VoxelCoord::new(2, 2, 2);
        let neighbors = coord.all_neighbors();
        assert_eq!(neighbors.len(), 26);
        assert!(!neighbors.contains(&coord));
        assert!(neighbors.contains(&VoxelCoord::new(1, 1, 1)));
        assert!(neighbors.contains(&VoxelCoord::new(3, 3, 3)));
    }

    #[test]
    fn usable_as_hash_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(VoxelCoord::new(1, 2, 3), 0usize);
        map.insert(VoxelCoord::new(1, 2, 3), 1usize);
        assert_eq!(map.len(), 1);
    }
}
