//! Windowed active-set scalar field over a trajectory.

use std::collections::VecDeque;

use nalgebra::Point3;
use tracing::trace;

use metatube_types::{Aabb, Trajectory};

use crate::error::{SweepError, SweepResult};
use crate::quadric::RigidQuadric;

/// A scalar field that can be sampled by an iso-surface extractor.
///
/// Negative inside the solid, positive outside, zero on the surface.
pub trait ScalarField {
    /// Evaluate the field at a world-space point.
    fn value(&self, point: &Point3<f64>) -> f64;
}

/// The metatube implicit function, restricted to a sliding window.
///
/// Evaluating the union of every per-sample ellipsoid at every query
/// point would make extraction quadratic in trajectory length. Instead
/// the field tracks an *active window*: the quadrics of the samples
/// whose translated bounding boxes overlap the current sampling box.
/// The window is rebuilt from scratch on every [`set_window`] call; no
/// state persists across calls.
///
/// The field value is the minimum over the active quadrics. This is a
/// min over signed quadric values, not a true signed-distance union:
/// it is geometrically correct only near the zero level set of each
/// summand, an accepted approximation for the near-convex,
/// similarly-scaled ellipsoids involved.
///
/// [`set_window`]: MetatubeField::set_window
#[derive(Debug)]
pub struct MetatubeField<'a> {
    trajectory: &'a Trajectory,
    sample_boxes: Vec<Aabb>,
    template: RigidQuadric,
    stride: usize,
    sampling_box: Aabb,
    active: VecDeque<RigidQuadric>,
}

impl<'a> MetatubeField<'a> {
    /// Create a field over a trajectory.
    ///
    /// `stride` is the window scan skip factor: samples are probed
    /// every `stride` indices when growing the window.
    ///
    /// # Errors
    ///
    /// Returns an error if `stride` is zero.
    pub fn new(trajectory: &'a Trajectory, stride: usize) -> SweepResult<Self> {
        if stride == 0 {
            return Err(SweepError::InvalidStride(stride));
        }
        let sample_boxes = (0..trajectory.len())
            .map(|i| trajectory.sample_box(i))
            .collect();
        Ok(Self {
            trajectory,
            sample_boxes,
            template: RigidQuadric::ellipsoid(trajectory.axes()),
            stride,
            sampling_box: trajectory.sample_box(0),
            active: VecDeque::new(),
        })
    }

    /// Rebuild the active window around the anchor sample `idx`.
    ///
    /// The sampling box is the anchor's bounding box snapped outward to
    /// the `cell_size` grid. Scanning proceeds backward and forward
    /// from the anchor at the configured stride and stops at the first
    /// sample whose bounding box no longer overlaps the sampling box
    /// in each direction (monotonic-overlap assumption).
    ///
    /// Returns the next unprocessed trajectory index: the last sample
    /// whose *position* lies inside the sampling box (not merely whose
    /// box overlaps it), or one past the end when the anchor is near
    /// the trajectory's tail. The result strictly exceeds `idx`, which
    /// guarantees the caller's scan loop terminates. When the stride
    /// does not evenly divide the remaining samples, the very last
    /// sample gets one extra check so it is not silently dropped.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    pub fn set_window(&mut self, idx: usize, cell_size: f64) -> usize {
        let count = self.trajectory.len();
        let positions = self.trajectory.positions();
        let orientations = self.trajectory.orientations();
        let stride = self.stride;

        self.sampling_box = self.sample_boxes[idx].discretized(cell_size);
        self.active.clear();

        // Trailing part
        let mut i = idx;
        while i >= stride {
            i -= stride;
            if self.sampling_box.overlaps(&self.sample_boxes[i]) {
                self.active
                    .push_front(self.template.placed(&positions[i], &orientations[i]));
            } else {
                break;
            }
        }

        // Anchor
        self.active
            .push_back(self.template.placed(&positions[idx], &orientations[idx]));

        // Leading part
        let mut next_idx = if idx + stride < count { idx + stride } else { count };
        let mut i = next_idx;
        while i < count {
            // Track the last sample geometrically inside the sampling box;
            // this drives the caller's resume index
            if self.sampling_box.contains(&positions[i]) {
                next_idx = i;
            }
            if self.sampling_box.overlaps(&self.sample_boxes[i]) {
                self.active
                    .push_back(self.template.placed(&positions[i], &orientations[i]));
            } else {
                break;
            }
            i += stride;
        }

        // The last sample may have been skipped only because the sample
        // count is not divisible by the stride
        let remainder = count - next_idx.min(count);
        if remainder > 0 && remainder <= stride {
            let last = count - 1;
            if self.sampling_box.contains(&positions[last]) {
                next_idx = last;
            }
            if self.sampling_box.overlaps(&self.sample_boxes[last]) {
                self.active
                    .push_back(self.template.placed(&positions[last], &orientations[last]));
            }
        }

        trace!(
            anchor = idx,
            active = self.active.len(),
            next = next_idx,
            "Rebuilt active window"
        );
        next_idx
    }

    /// The current sampling box (set by the last [`set_window`] call).
    ///
    /// [`set_window`]: MetatubeField::set_window
    #[must_use]
    pub fn sampling_box(&self) -> Aabb {
        self.sampling_box
    }

    /// Number of quadrics in the active window.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl ScalarField for MetatubeField<'_> {
    /// Minimum over the active quadrics; +∞ for an empty window.
    fn value(&self, point: &Point3<f64>) -> f64 {
        self.active
            .iter()
            .map(|q| q.evaluate(point))
            .fold(f64::INFINITY, f64::min)
    }
}
