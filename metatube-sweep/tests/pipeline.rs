//! End-to-end extraction pipeline tests.
//!
//! These drive the full trajectory-to-file path: field scan
//! conversion, deduplication, MLS projection, tessellation and the
//! plain-text mesh writer.

#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use std::f64::consts::PI;

use metatube_sweep::{
    export_batch, export_metatube, extract_metatube, ExportMode, ExtractionParams, ScalarField,
    SurfaceExtractor, VertexSink, RING_SEGMENTS,
};
use metatube_types::{Aabb, Trajectory};
use nalgebra::{Point3, UnitQuaternion, Vector3};

fn straight_line(n: usize, step: f64, axes: Vector3<f64>) -> Trajectory {
    let positions = (0..n)
        .map(|i| Point3::new(i as f64 * step, 0.0, 0.0))
        .collect();
    let orientations = vec![UnitQuaternion::identity(); n];
    Trajectory::new(positions, orientations, axes).unwrap()
}

/// Ignores the field and streams a dense cylinder-surface cloud
/// clipped to the domain. Stands in for a real contouring backend
/// with a shape the MLS projector can be checked against.
struct CylinderCloudExtractor {
    radius: f64,
}

impl SurfaceExtractor for CylinderCloudExtractor {
    fn extract(
        &mut self,
        _field: &dyn ScalarField,
        domain: &Aabb,
        _resolution: [usize; 3],
        sink: &mut VertexSink<'_>,
    ) {
        let steps = 40;
        let rings = 30;
        for a in 0..rings {
            let x = domain.min.x + (a as f64 + 0.5) * domain.extent().x / rings as f64;
            for s in 0..steps {
                let angle = 2.0 * PI * s as f64 / steps as f64;
                let p = Point3::new(x, self.radius * angle.cos(), self.radius * angle.sin());
                if domain.contains(&p) {
                    sink(p, Vector3::new(0.0, angle.cos(), angle.sin()));
                }
            }
        }
    }
}

#[test]
fn approximate_export_writes_expected_mesh() {
    let traj = straight_line(3, 1.0, Vector3::new(1.0, 1.0, 1.0));
    let dir = std::env::temp_dir().join("metatube-pipeline-approx");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tube.txt");

    export_metatube(
        &traj,
        &ExtractionParams::default(),
        &mut ExportMode::Approximate,
        &path,
    )
    .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let segs = RING_SEGMENTS as usize;
    let vertex_lines = text.lines().filter(|l| l.starts_with("v ")).count();
    let normal_lines = text.lines().filter(|l| l.starts_with("vn ")).count();
    let face_lines = text.lines().filter(|l| l.starts_with("3 ")).count();

    // Three rings plus two cap apexes; two quad bands plus two fans
    assert_eq!(vertex_lines, 3 * segs + 2);
    assert_eq!(normal_lines, vertex_lines);
    assert_eq!(face_lines, 2 * 2 * segs + 2 * segs);
}

#[test]
fn approximate_rings_have_constant_radius() {
    let traj = straight_line(4, 1.0, Vector3::new(2.0, 1.0, 3.0));
    let mesh = extract_metatube(
        &traj,
        &ExtractionParams::default(),
        &mut ExportMode::Approximate,
    )
    .unwrap();

    let radius = traj.mean_radius();
    let ring_vertices = mesh.vertex_count() - 2;
    for i in 0..ring_vertices {
        let p = mesh.positions[i];
        let off_axis = (p.y * p.y + p.z * p.z).sqrt();
        assert!(
            (off_axis - radius).abs() < 1e-9,
            "vertex {i} off the ring radius: {off_axis} vs {radius}"
        );
    }
}

#[test]
fn exact_mode_projects_onto_cylinder_cloud() {
    // Straight trajectory along x with unit mean radius; the stub
    // cloud is a radius-1 cylinder around the same axis, so projected
    // ring vertices must land near that cylinder
    let traj = straight_line(5, 0.8, Vector3::new(1.0, 1.0, 1.0));
    let mut extractor = CylinderCloudExtractor { radius: 1.0 };
    let mesh = extract_metatube(
        &traj,
        &ExtractionParams::default(),
        &mut ExportMode::Exact(&mut extractor),
    )
    .unwrap();

    assert!(mesh.triangle_count() > 0);
    let ring_vertices = mesh.vertex_count() - 2;
    let mut off_cylinder = 0usize;
    for i in 0..ring_vertices {
        let p = mesh.positions[i];
        assert!(p.coords.iter().all(|c| c.is_finite()));
        let off_axis = (p.y * p.y + p.z * p.z).sqrt();
        if (off_axis - 1.0).abs() > 0.15 {
            off_cylinder += 1;
        }
    }
    // Interior rings project cleanly; the cloud thins out near the
    // domain ends, so allow a minority of stragglers
    assert!(
        off_cylinder * 4 < ring_vertices,
        "{off_cylinder} of {ring_vertices} vertices missed the cylinder"
    );
}

#[test]
fn no_degenerate_triangles_after_projection() {
    let traj = straight_line(5, 0.8, Vector3::new(1.0, 1.0, 1.0));
    let mut extractor = CylinderCloudExtractor { radius: 1.0 };
    let mesh = extract_metatube(
        &traj,
        &ExtractionParams::default(),
        &mut ExportMode::Exact(&mut extractor),
    )
    .unwrap();

    for t in 0..mesh.triangle_count() {
        let area = mesh.triangle_area(t).unwrap();
        assert!(area.is_finite());
    }
}

#[test]
fn batch_export_continues_past_unwritable_destination() {
    let dir = std::env::temp_dir().join("metatube-pipeline-batch");
    std::fs::create_dir_all(&dir).unwrap();

    let trajectories = vec![
        straight_line(3, 1.0, Vector3::new(1.0, 1.0, 1.0)),
        straight_line(4, 0.9, Vector3::new(1.0, 1.0, 1.0)),
    ];
    let outcomes = export_batch(
        &trajectories,
        &ExtractionParams::default(),
        &mut ExportMode::Approximate,
        &dir,
    );
    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        let path = outcome.as_ref().unwrap();
        assert!(path.exists());
    }

    // An unwritable directory fails every trajectory without panicking
    let missing = dir.join("does-not-exist");
    let outcomes = export_batch(
        &trajectories,
        &ExtractionParams::default(),
        &mut ExportMode::Approximate,
        &missing,
    );
    assert!(outcomes.iter().all(Result::is_err));
}
