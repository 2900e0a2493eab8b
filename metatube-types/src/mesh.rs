//! Output triangle mesh.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The triangle mesh produced by one trajectory export.
///
/// Positions and normals are index-aligned; each triangle references
/// three vertices by 0-based index with counter-clockwise winding.
/// Ownership transfers to the writer or caller once triangulation
/// completes; no further mutation happens after that.
///
/// # Example
///
/// ```
/// use metatube_types::SweptMesh;
/// use nalgebra::{Point3, Vector3};
///
/// let mut mesh = SweptMesh::new();
/// mesh.push_vertex(Point3::origin(), Vector3::z());
/// mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z());
/// mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z());
/// mesh.triangles.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweptMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Per-vertex normals, index-aligned with `positions`.
    pub normals: Vec<Vector3<f64>>,
    /// Triangles as vertex index triples, CCW winding.
    pub triangles: Vec<[u32; 3]>,
}

impl SweptMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Append a vertex, returning its index.
    #[allow(clippy::cast_possible_truncation)] // meshes stay far below u32::MAX vertices
    pub fn push_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Area of the triangle at `index`, or `None` if out of range.
    #[must_use]
    pub fn triangle_area(&self, index: usize) -> Option<f64> {
        let [a, b, c] = *self.triangles.get(index)?;
        let pa = *self.positions.get(a as usize)?;
        let pb = *self.positions.get(b as usize)?;
        let pc = *self.positions.get(c as usize)?;
        Some((pb - pa).cross(&(pc - pa)).norm() * 0.5)
    }
}
