//! Point-set surface and iterative projection.

use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use tracing::{debug, warn};

use metatube_spatial::PointIndex;

use crate::error::{MlsError, MlsResult};

/// Every k-th cloud point is sampled when estimating the average
/// nearest-neighbor spacing.
const SPACING_SAMPLE_STRIDE: usize = 4;

/// Iteration cap for one projection.
const MAX_ITERATIONS: usize = 128;

/// A projection converges once successive iterates move less than this.
const CONVERGENCE_EPSILON: f64 = 8.0 * f64::EPSILON;

/// Minimum neighborhood size for a meaningful plane fit.
const MIN_NEIGHBORS: usize = 4;

/// Compactly-supported Wendland falloff kernel.
///
/// Smooth to second order, strictly positive for `distance < support`
/// and exactly zero beyond it.
///
/// # Example
///
/// ```
/// use metatube_mls::wendland;
///
/// assert!(wendland(0.0, 1.0) > wendland(0.5, 1.0));
/// assert_eq!(wendland(1.5, 1.0), 0.0);
/// ```
#[must_use]
pub fn wendland(distance: f64, support: f64) -> f64 {
    if distance > support {
        return 0.0;
    }
    let norm = support.powi(5);
    let base = support - distance;
    base.powi(4) * (support + 4.0 * distance) / norm
}

/// Result of projecting one point onto a point-set surface.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// The projected position; equals the query when unsupported.
    pub position: Point3<f64>,
    /// Estimated surface normal, oriented against the reference
    /// direction if one was supplied.
    pub normal: Vector3<f64>,
    /// False when too few neighbors were found and the query was
    /// returned unprojected. Degrades smoothness locally, never fatal.
    pub supported: bool,
}

/// An implicit surface defined by a point cloud.
///
/// Wraps a nearest-neighbor index and a bandwidth derived from the
/// cloud's average sample spacing.
#[derive(Debug, Clone)]
pub struct PointSetSurface<I: PointIndex> {
    index: I,
    support: f64,
}

impl<I: PointIndex> PointSetSurface<I> {
    /// Build a surface over an indexed point cloud.
    ///
    /// The projection bandwidth is `bandwidth_multiplier` times the
    /// cloud's average nearest-neighbor spacing, estimated from every
    /// 4th point.
    ///
    /// # Errors
    ///
    /// Returns an error if the cloud holds fewer than 2 points or the
    /// multiplier is not a positive finite number.
    pub fn new(index: I, bandwidth_multiplier: f64) -> MlsResult<Self> {
        if bandwidth_multiplier <= 0.0 || !bandwidth_multiplier.is_finite() {
            return Err(MlsError::InvalidBandwidth(bandwidth_multiplier));
        }
        let points = index.points();
        if points.len() < 2 {
            return Err(MlsError::TooFewPoints {
                min: 2,
                actual: points.len(),
            });
        }

        let mut sum = 0.0;
        let mut count = 0usize;
        for i in (0..points.len()).step_by(SPACING_SAMPLE_STRIDE) {
            let nearest = index.k_nearest(&points[i], 2);
            if let Some(&(_, dist)) = nearest.get(1) {
                sum += dist;
                count += 1;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let avg_spacing = sum / count as f64;
        let support = avg_spacing * bandwidth_multiplier;

        debug!(
            points = points.len(),
            avg_spacing = format!("{avg_spacing:.4}"),
            support = format!("{support:.4}"),
            "Built point-set surface"
        );

        Ok(Self { index, support })
    }

    /// The projection bandwidth `h` in world units.
    #[must_use]
    pub fn support(&self) -> f64 {
        self.support
    }

    /// Project `query` onto the surface.
    ///
    /// `reference_normal`, when given, resolves the sign ambiguity of
    /// the fitted plane normal: the returned normal is flipped to have
    /// a non-negative dot product with the reference, keeping normals
    /// consistently outward-facing along a surface walk.
    ///
    /// A query whose iterate ends up with fewer than 4 neighbors
    /// inside the bandwidth is returned unprojected with
    /// `supported == false`.
    #[must_use]
    pub fn project(&self, query: &Point3<f64>, reference_normal: Option<&Vector3<f64>>) -> Projection {
        let points = self.index.points();

        // Seed at the closest cloud point
        let mut iterate = match self.index.nearest(query) {
            Some((seed, _)) => points[seed],
            None => *query,
        };
        let mut normal = Vector3::zeros();

        for _ in 0..MAX_ITERATIONS {
            let neighbors = self.index.within_radius(&iterate, self.support);
            if neighbors.len() < MIN_NEIGHBORS {
                warn!(
                    neighbors = neighbors.len(),
                    "MLS projection failed: insufficient local support"
                );
                return Projection {
                    position: *query,
                    normal: reference_normal.copied().unwrap_or_else(Vector3::zeros),
                    supported: false,
                };
            }

            let mut neighbor_points = Vec::with_capacity(neighbors.len());
            let mut weights = Vec::with_capacity(neighbors.len());
            for &(idx, dist) in &neighbors {
                neighbor_points.push(points[idx]);
                weights.push(wendland(dist, self.support));
            }

            let (mean, plane_normal) = fit_weighted_plane(&neighbor_points, &weights);
            normal = plane_normal;

            // Always re-project the original query, not the iterate
            let next = plane_project(query, &plane_normal, &mean);
            let step = (next - iterate).norm();
            iterate = next;
            if step < CONVERGENCE_EPSILON {
                break;
            }
        }

        if let Some(reference) = reference_normal {
            if normal.dot(reference) < 0.0 {
                normal = -normal;
            }
        }

        Projection {
            position: iterate,
            normal,
            supported: true,
        }
    }
}

/// Weighted-PCA plane fit: weighted mean plus the eigenvector of the
/// weighted covariance with the smallest eigenvalue.
fn fit_weighted_plane(points: &[Point3<f64>], weights: &[f64]) -> (Point3<f64>, Vector3<f64>) {
    let total: f64 = weights.iter().sum();

    let mut mean = Vector3::zeros();
    for (p, &w) in points.iter().zip(weights) {
        mean += p.coords * w;
    }
    mean /= total;

    let mut covariance = Matrix3::zeros();
    for (p, &w) in points.iter().zip(weights) {
        let d = p.coords - mean;
        covariance += (d * d.transpose()) * w;
    }
    covariance /= total;

    let eigen = SymmetricEigen::new(covariance);
    let mut smallest = 0;
    for i in 1..3 {
        if eigen.eigenvalues[i] < eigen.eigenvalues[smallest] {
            smallest = i;
        }
    }
    let normal = eigen
        .eigenvectors
        .column(smallest)
        .into_owned()
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::z);

    (Point3::from(mean), normal)
}

/// Project `point` onto the plane through `reference` with unit
/// `normal`.
fn plane_project(point: &Point3<f64>, normal: &Vector3<f64>, reference: &Point3<f64>) -> Point3<f64> {
    let offset = point - reference;
    point - normal * normal.dot(&offset)
}
