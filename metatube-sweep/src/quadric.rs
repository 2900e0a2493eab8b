//! Implicit representation of one oriented ellipsoid instance.

use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Convert an orientation quaternion to a rotation axis and angle.
///
/// For quaternions whose scalar part is within floating-point epsilon
/// of ±1 the rotation is (numerically) the identity and the naive
/// `sqrt(1 - w²)` normalization is undefined; this returns a
/// well-defined identity rotation instead of propagating NaN.
///
/// # Example
///
/// ```
/// use metatube_sweep::orientation_axis_angle;
/// use nalgebra::UnitQuaternion;
///
/// let (axis, angle) = orientation_axis_angle(&UnitQuaternion::identity());
/// assert!(axis.iter().all(|c| c.is_finite()));
/// assert_eq!(angle, 0.0);
/// ```
#[must_use]
pub fn orientation_axis_angle(orientation: &UnitQuaternion<f64>) -> (Vector3<f64>, f64) {
    match orientation.axis_angle() {
        Some((axis, angle)) => (axis.into_inner(), angle),
        // Zero rotation: any axis works, the angle is what matters
        None => (Vector3::y(), 0.0),
    }
}

/// A symmetric quadratic form under a rigid transform.
///
/// Represents one ellipsoid instance along the trajectory: an
/// axis-aligned quadric (only the diagonal coefficients and the
/// constant term are populated for the ellipsoid case) carried to its
/// sample pose by a rotation axis/angle pair and a translation.
/// Negative inside, positive outside, zero on the surface.
///
/// Instances are derived once per trajectory sample and immutable
/// afterwards; many coexist in the active window.
#[derive(Debug, Clone, Copy)]
pub struct RigidQuadric {
    a_xx: f64,
    a_xy: f64,
    a_xz: f64,
    a_xw: f64,
    a_yy: f64,
    a_yz: f64,
    a_yw: f64,
    a_zz: f64,
    a_zw: f64,
    a_ww: f64,
    axis: Vector3<f64>,
    angle: f64,
    translation: Vector3<f64>,
}

impl RigidQuadric {
    /// The untransformed quadric for an ellipsoid with the given
    /// semi-axis triple.
    ///
    /// The diagonal coefficients are the axis values and the constant
    /// term is −0.25, which places the implicit zero level set at the
    /// ellipsoid surface in the calibration the extraction pipeline
    /// expects.
    #[must_use]
    pub fn ellipsoid(axes: Vector3<f64>) -> Self {
        Self {
            a_xx: axes.x,
            a_xy: 0.0,
            a_xz: 0.0,
            a_xw: 0.0,
            a_yy: axes.y,
            a_yz: 0.0,
            a_yw: 0.0,
            a_zz: axes.z,
            a_zw: 0.0,
            a_ww: -0.25,
            axis: Vector3::y(),
            angle: 0.0,
            translation: Vector3::zeros(),
        }
    }

    /// This quadric carried to a trajectory sample's pose.
    #[must_use]
    pub fn placed(&self, position: &Point3<f64>, orientation: &UnitQuaternion<f64>) -> Self {
        let (axis, angle) = orientation_axis_angle(orientation);
        Self {
            axis,
            angle,
            translation: position.coords,
            ..*self
        }
    }

    /// Evaluate the implicit function at a world-space point.
    ///
    /// The point is carried into the ellipsoid's local frame
    /// (inverse-translate, rotate by the negated angle) and fed through
    /// the quadratic form.
    #[must_use]
    pub fn evaluate(&self, point: &Point3<f64>) -> f64 {
        let local = self.rotate(point.coords - self.translation, -self.angle);
        self.quadratic_form(&local)
    }

    /// Rodrigues rotation of `v` about the stored axis by `angle`.
    fn rotate(&self, v: Vector3<f64>, angle: f64) -> Vector3<f64> {
        let parallel = self.axis * v.dot(&self.axis);
        let x = v - parallel;
        let y = self.axis.cross(&x);
        parallel + x * angle.cos() + y * angle.sin()
    }

    fn quadratic_form(&self, p: &Vector3<f64>) -> f64 {
        p.x * (self.a_xx * p.x + self.a_xy * p.y + self.a_xz * p.z + self.a_xw)
            + p.y * (self.a_yy * p.y + self.a_yz * p.z + self.a_yw)
            + p.z * (self.a_zz * p.z + self.a_zw)
            + self.a_ww
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_quaternion_never_nan() {
        let (axis, angle) = orientation_axis_angle(&UnitQuaternion::identity());
        assert!(axis.x.is_finite() && axis.y.is_finite() && axis.z.is_finite());
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn near_identity_quaternion_small_angle() {
        // Scalar part within epsilon of 1
        let q = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1e-9);
        let (axis, angle) = orientation_axis_angle(&q);
        assert!(axis.iter().all(|c| c.is_finite()));
        assert!(angle.abs() < 1e-7);
    }

    #[test]
    fn negated_identity_quaternion_never_nan() {
        // w == -1 represents the same (identity) rotation
        let q = UnitQuaternion::new_unchecked(nalgebra::Quaternion::new(-1.0, 0.0, 0.0, 0.0));
        let (axis, angle) = orientation_axis_angle(&q);
        assert!(axis.iter().all(|c| c.is_finite()));
        assert!(angle.is_finite());
    }

    #[test]
    fn sign_convention_inside_negative() {
        let q = RigidQuadric::ellipsoid(Vector3::new(1.0, 1.0, 1.0));
        // Surface at radius 0.5 for unit coefficients
        assert!(q.evaluate(&Point3::origin()) < 0.0);
        assert!(q.evaluate(&Point3::new(1.0, 0.0, 0.0)) > 0.0);
        assert_relative_eq!(q.evaluate(&Point3::new(0.5, 0.0, 0.0)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn translation_moves_level_set() {
        let q = RigidQuadric::ellipsoid(Vector3::new(1.0, 1.0, 1.0))
            .placed(&Point3::new(10.0, 0.0, 0.0), &UnitQuaternion::identity());
        assert!(q.evaluate(&Point3::new(10.0, 0.0, 0.0)) < 0.0);
        assert!(q.evaluate(&Point3::origin()) > 0.0);
        assert_relative_eq!(
            q.evaluate(&Point3::new(10.5, 0.0, 0.0)),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn rotation_swaps_principal_axes() {
        // Elongated along x; after a 90° turn about z, elongated along y.
        let axes = Vector3::new(0.25, 4.0, 4.0);
        let upright = RigidQuadric::ellipsoid(axes);
        // Level set crosses x at 1.0 (0.25 x² = 0.25) and y at 0.25
        assert_relative_eq!(upright.evaluate(&Point3::new(1.0, 0.0, 0.0)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(upright.evaluate(&Point3::new(0.0, 0.25, 0.0)), 0.0, epsilon = 1e-12);

        let turned = upright.placed(
            &Point3::origin(),
            &UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2),
        );
        assert_relative_eq!(turned.evaluate(&Point3::new(0.0, 1.0, 0.0)), 0.0, epsilon = 1e-9);
        assert_relative_eq!(turned.evaluate(&Point3::new(0.25, 0.0, 0.0)), 0.0, epsilon = 1e-9);
    }
}
