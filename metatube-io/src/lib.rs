//! Plain-text mesh serialization for metatube exports.
//!
//! Writes a [`SweptMesh`](metatube_types::SweptMesh) as a simple line
//! format:
//!
//! ```text
//! v x y z        one line per vertex position
//! vn x y z       one line per vertex normal
//! 3 i j k        one line per triangle: vertex count, then 0-based indices
//! ```
//!
//! The writer validates only position/normal length consistency; writes
//! are append-only and fail only on an unwritable destination.
//!
//! # Example
//!
//! ```
//! use metatube_io::write_mesh;
//! use metatube_types::SweptMesh;
//! use nalgebra::{Point3, Vector3};
//!
//! let mut mesh = SweptMesh::new();
//! mesh.push_vertex(Point3::origin(), Vector3::z());
//! mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z());
//! mesh.push_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z());
//! mesh.triangles.push([0, 1, 2]);
//!
//! let mut out = Vec::new();
//! write_mesh(&mesh, &mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with("v 0 0 0\n"));
//! assert!(text.ends_with("3 0 1 2\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use metatube_types::SweptMesh;

pub use error::{WriteError, WriteResult};

/// Write a mesh to any [`Write`] destination.
///
/// # Errors
///
/// Returns an error if the position and normal arrays differ in length
/// or the destination rejects a write.
pub fn write_mesh<W: Write>(mesh: &SweptMesh, writer: &mut W) -> WriteResult<()> {
    if mesh.positions.len() != mesh.normals.len() {
        return Err(WriteError::LengthMismatch {
            positions: mesh.positions.len(),
            normals: mesh.normals.len(),
        });
    }

    for p in &mesh.positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for n in &mesh.normals {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for t in &mesh.triangles {
        writeln!(writer, "3 {} {} {}", t[0], t[1], t[2])?;
    }

    Ok(())
}

/// Write a mesh to a file, creating or truncating it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written, or the
/// mesh arrays are inconsistent.
pub fn write_mesh_file<P: AsRef<Path>>(mesh: &SweptMesh, path: P) -> WriteResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_mesh(mesh, &mut writer)?;
    writer.flush()?;

    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Wrote mesh"
    );
    Ok(())
}
