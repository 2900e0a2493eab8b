//! End-to-end metatube extraction and export.

use std::path::{Path, PathBuf};

use nalgebra::{Point3, Vector3};
use tracing::{info, warn};

use metatube_io::write_mesh_file;
use metatube_mls::PointSetSurface;
use metatube_spatial::{BruteForceIndex, DedupGrid};
use metatube_types::{Aabb, SweptMesh, Trajectory};

use crate::error::SweepResult;
use crate::field::{MetatubeField, ScalarField};
use crate::tube::{tessellate_tube, tessellate_tube_mls};

/// Sampling cells across one ellipsoid's shortest extent.
const RESOLUTION_TARGET: f64 = 8.0;

/// Semi-axis ratio beyond which the extracted cloud is too flat for a
/// first-order MLS approximant.
const FLATNESS_RATIO: f64 = 2.5;

/// Sink receiving candidate surface vertices during extraction.
pub type VertexSink<'a> = dyn FnMut(Point3<f64>, Vector3<f64>) + 'a;

/// An iso-surface extraction backend.
///
/// Samples a scalar field over an axis-aligned domain at the given
/// per-axis resolution and streams the zero-level-set vertices it
/// finds into the sink. Implementations own the actual contouring
/// algorithm; the pipeline only depends on this interface.
pub trait SurfaceExtractor {
    /// Extract surface vertices from `field` over `domain`.
    fn extract(
        &mut self,
        field: &dyn ScalarField,
        domain: &Aabb,
        resolution: [usize; 3],
        sink: &mut VertexSink<'_>,
    );
}

/// How the tube surface is obtained.
pub enum ExportMode<'a> {
    /// Direct tube tessellation with a circular cross-section; no
    /// field sampling.
    Approximate,
    /// Scan-convert the implicit metatube with the given extractor and
    /// project the tessellation onto the resulting point cloud.
    Exact(&'a mut dyn SurfaceExtractor),
}

/// Tuning knobs for the extraction pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionParams {
    /// Window scan stride; 1 considers every sample.
    pub stride: usize,
    /// MLS bandwidth as a multiple of the average point spacing.
    pub bandwidth_multiplier: f64,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            stride: 1,
            bandwidth_multiplier: 5.0,
        }
    }
}

/// Extract the metatube mesh for one trajectory.
///
/// In approximate mode this is a direct tube tessellation. In exact
/// mode the implicit metatube is scan-converted window by window, the
/// extracted vertices are deduplicated into a point cloud, and the
/// tube tessellation is projected onto the cloud's MLS surface.
///
/// Ellipsoids whose longest semi-axis is [`FLATNESS_RATIO`] times the
/// shortest or more produce a cloud too flat for the first-order MLS
/// approximant; exact mode then degrades to the approximate
/// tessellation before any field sampling happens.
///
/// # Errors
///
/// Returns an error if the stride is zero, or if exact mode yields a
/// point cloud too small to carry an MLS surface.
pub fn extract_metatube(
    trajectory: &Trajectory,
    params: &ExtractionParams,
    mode: &mut ExportMode<'_>,
) -> SweepResult<SweptMesh> {
    let extractor = match mode {
        ExportMode::Approximate => return Ok(tessellate_tube(trajectory)),
        ExportMode::Exact(extractor) => extractor,
    };

    if trajectory.max_semi_axis() >= trajectory.min_semi_axis() * FLATNESS_RATIO {
        warn!(
            max = trajectory.max_semi_axis(),
            min = trajectory.min_semi_axis(),
            "Ellipsoid too flat for MLS projection, using approximate tessellation"
        );
        return Ok(tessellate_tube(trajectory));
    }

    let cell_size = trajectory.min_semi_axis() * 2.0 / RESOLUTION_TARGET;
    let mut field = MetatubeField::new(trajectory, params.stride)?;
    let mut dedup = DedupGrid::new(cell_size / 2.0)?;

    // Scan-convert the tube window by window; the resume index from
    // set_window drives the loop forward
    let mut i = 0usize;
    while i < trajectory.len() {
        i = field.set_window(i, cell_size);
        let domain = field.sampling_box();
        let resolution = domain_resolution(&domain, cell_size);
        extractor.extract(&field, &domain, resolution, &mut |position, normal| {
            dedup.insert(position, normal);
        });
    }

    info!(
        samples = trajectory.len(),
        cloud = dedup.len(),
        cell_size,
        "Scan conversion complete"
    );

    let (points, _normals) = dedup.into_parts();
    let index = BruteForceIndex::new(points)?;
    let surface = PointSetSurface::new(index, params.bandwidth_multiplier)?;
    Ok(tessellate_tube_mls(trajectory, &surface))
}

/// Per-axis cell counts covering the domain at the given cell size.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn domain_resolution(domain: &Aabb, cell_size: f64) -> [usize; 3] {
    let extent = domain.extent();
    [
        (extent.x / cell_size) as usize,
        (extent.y / cell_size) as usize,
        (extent.z / cell_size) as usize,
    ]
}

/// Extract one trajectory and write the mesh to `path`.
///
/// # Errors
///
/// Returns an error if extraction fails or the destination cannot be
/// written.
pub fn export_metatube<P: AsRef<Path>>(
    trajectory: &Trajectory,
    params: &ExtractionParams,
    mode: &mut ExportMode<'_>,
    path: P,
) -> SweepResult<()> {
    let mesh = extract_metatube(trajectory, params, mode)?;
    write_mesh_file(&mesh, path)?;
    Ok(())
}

/// Export every trajectory to `directory`, one mesh file per
/// trajectory, named by its index.
///
/// A failing trajectory is logged and skipped; the remaining
/// trajectories still export. Returns the per-trajectory outcomes,
/// index-aligned with the input.
pub fn export_batch(
    trajectories: &[Trajectory],
    params: &ExtractionParams,
    mode: &mut ExportMode<'_>,
    directory: &Path,
) -> Vec<SweepResult<PathBuf>> {
    trajectories
        .iter()
        .enumerate()
        .map(|(index, trajectory)| {
            let path = directory.join(format!("traj_{index:06}.txt"));
            match export_metatube(trajectory, params, mode, &path) {
                Ok(()) => Ok(path),
                Err(err) => {
                    warn!(index, error = %err, "Trajectory export failed, continuing batch");
                    Err(err)
                }
            }
        })
        .collect()
}
