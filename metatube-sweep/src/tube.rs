//! Tube tessellation along a trajectory.

use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};
use tracing::debug;

use metatube_mls::PointSetSurface;
use metatube_spatial::PointIndex;
use metatube_types::{SweptMesh, Trajectory};

/// Cross-section segments per ring.
pub const RING_SEGMENTS: u32 = 12;

/// Minimum length a direction must have before normalization.
const DIRECTION_EPSILON: f64 = 1e-12;

/// Tessellate the trajectory as a raw extruded tube.
///
/// Cross-section rings of [`RING_SEGMENTS`] vertices are extruded at
/// the mean semi-axis radius and emitted whenever the travel since the
/// previous ring reaches half that radius, then stitched into quads
/// and closed with single-apex cap fans. No surface projection is
/// applied; the result approximates the metatube with a circular
/// cross-section.
#[must_use]
pub fn tessellate_tube(trajectory: &Trajectory) -> SweptMesh {
    tessellate_with(trajectory, &mut |extruded, direction| {
        (*extruded, *direction)
    })
}

/// Tessellate the trajectory and project every ring vertex onto an
/// MLS surface.
///
/// Same ring placement as [`tessellate_tube`], but each extruded
/// vertex is pulled onto the moving-least-squares surface defined by
/// `surface`, with the extrusion direction as the normal orientation
/// reference. Cap apexes stay unprojected. Unsupported projections
/// fall back to the raw extruded vertex, so the result is always a
/// complete mesh.
#[must_use]
pub fn tessellate_tube_mls<I: PointIndex>(
    trajectory: &Trajectory,
    surface: &PointSetSurface<I>,
) -> SweptMesh {
    tessellate_with(trajectory, &mut |extruded, direction| {
        let projection = surface.project(extruded, Some(direction));
        (projection.position, projection.normal)
    })
}

/// Shared tessellation driver; `project` maps an extruded vertex and
/// its extrusion direction to the final vertex and normal.
fn tessellate_with(
    trajectory: &Trajectory,
    project: &mut dyn FnMut(&Point3<f64>, &Vector3<f64>) -> (Point3<f64>, Vector3<f64>),
) -> SweptMesh {
    let positions = trajectory.positions();
    let radius = trajectory.mean_radius();
    let mut mesh = SweptMesh::new();

    // Bands emitted so far; ring r occupies vertices
    // [r * RING_SEGMENTS, (r + 1) * RING_SEGMENTS)
    let mut bands: u32 = 0;
    let mut last_emitted = 0usize;

    for i in 1..positions.len() {
        let travel = positions[i] - positions[last_emitted];
        if travel.norm() < radius / 2.0 {
            continue;
        }
        let direction = travel.normalize();

        if last_emitted == 0 && mesh.is_empty() {
            // The first ring is emitted lazily once a travel direction
            // exists; its in-plane frame is anchored by projecting the
            // world origin onto the cross-section plane
            let refx = anchor_axis(&Point3::origin(), &direction, &positions[0]);
            emit_ring(&mut mesh, &positions[0], &direction, &refx, radius, project);
        }

        // Parallel-transport the frame: reuse the previous ring's
        // first vertex as the in-plane anchor so rings do not twist
        // against each other
        let previous_start = mesh.positions[(bands * RING_SEGMENTS) as usize];
        let refx = anchor_axis(&previous_start, &direction, &positions[i]);
        emit_ring(&mut mesh, &positions[i], &direction, &refx, radius, project);

        bands += 1;
        stitch_band(&mut mesh, bands);
        last_emitted = i;
    }

    if mesh.is_empty() {
        // Stationary or sub-threshold trajectory: emit a single ring
        // so the caps have something to close against
        let overall = positions[positions.len() - 1] - positions[0];
        let direction = overall
            .try_normalize(DIRECTION_EPSILON)
            .unwrap_or_else(Vector3::z);
        let refx = anchor_axis(&Point3::origin(), &direction, &positions[0]);
        emit_ring(&mut mesh, &positions[0], &direction, &refx, radius, project);
        debug!("Trajectory shorter than one ring interval, emitted degenerate tube");
    }

    // Trailing cap
    let trailing = (positions[0] - positions[1])
        .try_normalize(DIRECTION_EPSILON)
        .unwrap_or_else(|| -Vector3::z());
    let apex = mesh.push_vertex(positions[0] + trailing * radius, trailing);
    for j in 1..=RING_SEGMENTS {
        mesh.triangles.push([apex, j % RING_SEGMENTS, j - 1]);
    }

    // Leading cap
    let n = positions.len();
    let leading = (positions[n - 1] - positions[n - 2])
        .try_normalize(DIRECTION_EPSILON)
        .unwrap_or_else(Vector3::z);
    let apex = mesh.push_vertex(positions[n - 1] + leading * radius, leading);
    let last_ring = bands * RING_SEGMENTS;
    for j in 1..=RING_SEGMENTS {
        mesh.triangles
            .push([apex, last_ring + j - 1, last_ring + j % RING_SEGMENTS]);
    }

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        bands,
        "Tessellated tube"
    );
    mesh
}

/// In-plane x axis of a cross-section frame.
///
/// Projects `anchor` onto the plane through `center` with normal
/// `normal` and normalizes the offset from the center. Degenerates
/// when the anchor sits on the plane's normal line through the center;
/// an arbitrary perpendicular is used then so no NaN enters the mesh.
fn anchor_axis(
    anchor: &Point3<f64>,
    normal: &Vector3<f64>,
    center: &Point3<f64>,
) -> Vector3<f64> {
    let projected = anchor - normal * normal.dot(&(anchor - center));
    (projected - center)
        .try_normalize(DIRECTION_EPSILON)
        .unwrap_or_else(|| perpendicular(normal))
}

/// Any unit vector perpendicular to the given unit vector.
fn perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let candidate = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    v.cross(&candidate).normalize()
}

/// Emit one ring of [`RING_SEGMENTS`] vertices around `center`.
fn emit_ring(
    mesh: &mut SweptMesh,
    center: &Point3<f64>,
    direction: &Vector3<f64>,
    refx: &Vector3<f64>,
    radius: f64,
    project: &mut dyn FnMut(&Point3<f64>, &Vector3<f64>) -> (Point3<f64>, Vector3<f64>),
) {
    let refy = direction.cross(refx);
    for j in 0..RING_SEGMENTS {
        let param = 2.0 * PI * f64::from(j) / f64::from(RING_SEGMENTS);
        let extrusion_dir = refx * param.cos() + refy * param.sin();
        let extruded = center + extrusion_dir * radius;
        let (position, normal) = project(&extruded, &extrusion_dir);
        mesh.push_vertex(position, normal);
    }
}

/// Stitch ring `band - 1` to ring `band` with a strip of quads, two
/// triangles each.
fn stitch_band(mesh: &mut SweptMesh, band: u32) {
    let prev = (band - 1) * RING_SEGMENTS;
    let curr = band * RING_SEGMENTS;
    for j in 1..=RING_SEGMENTS {
        let a = prev + (j - 1);
        let b = prev + j % RING_SEGMENTS;
        let c = curr + (j - 1);
        let d = curr + j % RING_SEGMENTS;
        mesh.triangles.push([a, b, c]);
        mesh.triangles.push([c, b, d]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn straight_line(n: usize, step: f64) -> Trajectory {
        let positions = (0..n)
            .map(|i| Point3::new(i as f64 * step, 0.0, 0.0))
            .collect();
        let orientations = vec![UnitQuaternion::identity(); n];
        Trajectory::new(positions, orientations, Vector3::new(1.0, 1.0, 1.0)).unwrap()
    }

    #[test]
    fn straight_tube_counts() {
        // Unit spacing, unit mean radius: every sample is far enough
        // from the previous ring, so 3 samples give 3 rings
        let traj = straight_line(3, 1.0);
        let mesh = tessellate_tube(&traj);

        let segs = RING_SEGMENTS as usize;
        assert_eq!(mesh.vertex_count(), 3 * segs + 2);
        // Two bands of quads plus two cap fans
        assert_eq!(mesh.triangle_count(), 2 * 2 * segs + 2 * segs);
    }

    #[test]
    fn ring_vertices_at_extrusion_radius() {
        let traj = straight_line(3, 1.0);
        let mesh = tessellate_tube(&traj);
        let radius = traj.mean_radius();

        // First ring lies in the x = 0 plane around the first sample
        for v in &mesh.positions[..RING_SEGMENTS as usize] {
            assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(v.coords.norm(), radius, epsilon = 1e-12);
        }
    }

    #[test]
    fn normals_point_away_from_axis() {
        let traj = straight_line(4, 1.0);
        let mesh = tessellate_tube(&traj);
        let ring_vertices = mesh.vertex_count() - 2;
        for i in 0..ring_vertices {
            let radial = Vector3::new(0.0, mesh.positions[i].y, mesh.positions[i].z);
            assert!(mesh.normals[i].dot(&radial) > 0.0);
        }
    }

    #[test]
    fn no_degenerate_triangles() {
        let traj = straight_line(5, 0.9);
        let mesh = tessellate_tube(&traj);
        for t in 0..mesh.triangle_count() {
            let area = mesh.triangle_area(t).unwrap();
            assert!(area > 1e-9, "triangle {t} is degenerate: area {area}");
        }
    }

    #[test]
    fn subthreshold_travel_reuses_rings() {
        // Spacing far below radius / 2: only the fallback ring and the
        // caps are emitted
        let traj = straight_line(6, 0.01);
        let mesh = tessellate_tube(&traj);
        assert_eq!(mesh.vertex_count(), RING_SEGMENTS as usize + 2);
        assert_eq!(mesh.triangle_count(), 2 * RING_SEGMENTS as usize);
    }

    #[test]
    fn stationary_trajectory_is_finite() {
        let positions = vec![Point3::new(1.0, 2.0, 3.0); 4];
        let orientations = vec![UnitQuaternion::identity(); 4];
        let traj =
            Trajectory::new(positions, orientations, Vector3::new(0.5, 0.5, 0.5)).unwrap();
        let mesh = tessellate_tube(&traj);

        assert_eq!(mesh.vertex_count(), RING_SEGMENTS as usize + 2);
        for p in &mesh.positions {
            assert!(p.coords.iter().all(|c| c.is_finite()));
        }
        for n in &mesh.normals {
            assert!(n.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn trajectory_through_origin_is_finite() {
        // The first ring's frame anchor is the world origin; a
        // trajectory starting there must not produce NaN vertices
        let traj = straight_line(3, 1.0);
        let mesh = tessellate_tube(&traj);
        for p in &mesh.positions {
            assert!(p.coords.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn consecutive_rings_share_frame_phase() {
        // Vertex 0 of each ring stays on the same side of the axis
        // (discrete parallel transport, no twist)
        let traj = straight_line(4, 1.0);
        let mesh = tessellate_tube(&traj);
        let segs = RING_SEGMENTS as usize;
        let first = mesh.positions[0];
        for ring in 1..3 {
            let v = mesh.positions[ring * segs];
            let a = Vector3::new(0.0, first.y, first.z);
            let b = Vector3::new(0.0, v.y, v.z);
            assert!(a.dot(&b) > 0.9, "ring {ring} twisted against ring 0");
        }
    }
}
