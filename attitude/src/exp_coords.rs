//! Conversions between quaternion differences and exponential coordinates
//! (axis times angle), the minimal tangent-space representation used for
//! small attitude perturbations.

use crate::axis_angle::AxisAngle;
use crate::quaternion::UnitQuaternion;
use nalgebra::{Matrix3, Vector3};

/// Rotations with an angle at or below this are treated as exactly zero so
/// that a near-zero vector is never normalized into an axis.
pub const SMALL_ANGLE_TOL: f64 = 1e-6;

/// Returns the skew symmetric matrix corresponding to `v.cross(<other vector>)`,
/// i.e. `skew(v) * x == v.cross(x)` for every `x`.
pub fn skew(v: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(
        0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0,
    )
}

/// Returns the exponential coordinates of the rotation taking `quat2` to
/// `quat1`, the rotation part of `quat2.inv() * quat1` as axis times angle.
///
/// The magnitude is the rotation angle in [0, pi]. Angles at or below
/// [`SMALL_ANGLE_TOL`] return the zero vector.
pub fn subtract_quats(quat1: &UnitQuaternion, quat2: &UnitQuaternion) -> Vector3<f64> {
    let delta = quat2.inv() * *quat1;
    let axis_angle = AxisAngle::from(&delta);
    if axis_angle.angle <= SMALL_ANGLE_TOL {
        return Vector3::zeros();
    }
    axis_angle.axis * axis_angle.angle
}
