use crate::axis_angle::{AxisAngle, AxisAngleErrors};

use rand::{prelude::*, rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, Neg};
use thiserror::Error;

/// A struct representing a quaternion for 3D rotations.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Errors that can occur when creating a `Quaternion`.
#[derive(Debug, Clone, Error, Copy)]
pub enum QuaternionErrors {
    #[error("{0}")]
    AxisAngleErrors(#[from] AxisAngleErrors),
    #[error("got zero magnitude quaternion")]
    ZeroMagnitude,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Creates a new `Quaternion` from raw components.
    ///
    /// # Arguments
    ///
    /// * `x` - The x component of the quaternion.
    /// * `y` - The y component of the quaternion.
    /// * `z` - The z component of the quaternion.
    /// * `w` - The scalar component of the quaternion.
    ///
    /// # Returns
    ///
    /// A `Quaternion` instance. Not normalized, see `UnitQuaternion` for that.
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    // Dot product of two quaternions
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn inv(&self) -> Quaternion {
        Quaternion::new(
            -self.x, -self.y, -self.z, self.w,
        )
    }

    pub fn mag(&self) -> f64 {
        self.dot(self)
            .sqrt()
    }

    pub fn normalize(&self) -> Result<Self, QuaternionErrors> {
        let mag = self.mag();
        if mag < f64::EPSILON {
            return Err(QuaternionErrors::ZeroMagnitude);
        }
        Ok(Quaternion::new(
            self.x / mag,
            self.y / mag,
            self.z / mag,
            self.w / mag,
        ))
    }

    /// Creates a random quaternion.
    ///
    /// # Returns
    ///
    /// A random `Quaternion`.
    pub fn rand() -> Quaternion {
        let mut rng = rng();
        let x = rng.random_range(-1.0..1.0);
        let y = rng.random_range(-1.0..1.0);
        let z = rng.random_range(-1.0..1.0);
        let w = rng.random_range(-1.0..1.0);

        Quaternion::new(x, y, z, w)
    }
}

/// A quaternion with unit norm, valid as a rotation.
///
/// The invariant is enforced at construction; callers must not write
/// components that break it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default)]
pub struct UnitQuaternion(pub Quaternion);

impl UnitQuaternion {
    pub const IDENTITY: Self = Self(Quaternion::IDENTITY);

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Result<Self, QuaternionErrors> {
        Ok(Self(
            Quaternion::new(x, y, z, w).normalize()?,
        ))
    }

    pub fn inv(&self) -> Self {
        // no need to renormalize, conjugating keeps unit norm
        Self(
            self.0
                .inv(),
        )
    }

    pub fn rand() -> Result<Self, QuaternionErrors> {
        Ok(Self(
            Quaternion::rand().normalize()?,
        ))
    }
}

impl Default for Quaternion {
    /// Provides the default value for a quaternion.
    ///
    /// # Returns
    ///
    /// The identity quaternion.
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;

    /// Multiplies two quaternions (Hamilton product).
    /// Successive rotations compose on the right: q_total = q_first * q_delta
    /// applies q_delta in the body frame of q_first.
    ///
    /// # Arguments
    ///
    /// * `rhs` - The right-hand side quaternion.
    ///
    /// # Returns
    ///
    /// The product of the two quaternions.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<UnitQuaternion> for UnitQuaternion {
    type Output = Self;
    fn mul(self, rhs: UnitQuaternion) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(
            self.x * rhs,
            self.y * rhs,
            self.z * rhs,
            self.w * rhs,
        )
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(
            -self.x, -self.y, -self.z, -self.w,
        )
    }
}

impl Neg for UnitQuaternion {
    type Output = Self;

    fn neg(self) -> Self {
        // negating a unit quaternion keeps unit norm (same rotation, other cover)
        Self(-self.0)
    }
}

impl From<&AxisAngle> for UnitQuaternion {
    fn from(axis_angle: &AxisAngle) -> Self {
        let half_angle = axis_angle.angle / 2.0;
        let s = half_angle.sin();
        let c = half_angle.cos();
        // unwrap should be safe due to trig math
        UnitQuaternion::new(
            s * axis_angle.axis[0],
            s * axis_angle.axis[1],
            s * axis_angle.axis[2],
            c,
        )
        .unwrap()
    }
}

impl fmt::Debug for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Quaternion ")?;
        writeln!(f, "   x: {: >10.6}", self.x)?;
        writeln!(f, "   y: {: >10.6}", self.y)?;
        writeln!(f, "   z: {: >10.6}", self.z)?;
        writeln!(f, "   w: {: >10.6}", self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};
    const TOL: f64 = 1e-12;

    /// Test for quaternion normalization.
    #[test]
    fn test_quaternion_normalization() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0)
            .normalize()
            .unwrap();
        let qn = UnitQuaternion::new(1.0, 2.0, 3.0, 4.0).unwrap();

        assert_abs_diff_eq!(
            q.x,
            0.18257418583505536,
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            q.y,
            0.3651483716701107,
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            q.z,
            0.5477225575051661,
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            q.w,
            0.7302967433402214,
            epsilon = TOL
        );

        assert_abs_diff_eq!(
            qn.0.mag(),
            1.0,
            epsilon = TOL
        );
    }

    #[test]
    fn test_zero_quaternion_rejected() {
        assert!(UnitQuaternion::new(0.0, 0.0, 0.0, 0.0).is_err());
    }

    /// Test for quaternion inversion.
    #[test]
    fn test_quaternion_inv() {
        let q = UnitQuaternion::rand().unwrap();
        let inv = q.inv();

        assert_abs_diff_eq!(
            inv.0
                .w,
            q.0.w,
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            inv.0
                .x,
            -q.0
                .x,
            epsilon = TOL
        );

        // q * q^-1 is the identity
        let result = q * inv;
        assert_abs_diff_eq!(result.0.x, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(result.0.y, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(result.0.z, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(result.0.w, 1.0, epsilon = TOL);
    }

    #[test]
    fn test_quaternion_multiplication() {
        // 90 deg about x then 90 deg about z in the body frame
        let qx = UnitQuaternion::new(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2).unwrap();
        let qz = UnitQuaternion::new(0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2).unwrap();

        let result = qx * qz;

        assert_abs_diff_eq!(
            result
                .0
                .x,
            0.5,
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            result
                .0
                .y,
            -0.5,
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            result
                .0
                .z,
            0.5,
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            result
                .0
                .w,
            0.5,
            epsilon = TOL
        );
    }

    #[test]
    fn test_quaternion_identity_multiplication() {
        let q = UnitQuaternion::rand().unwrap();
        let result = q * UnitQuaternion::IDENTITY;

        assert_abs_diff_eq!(result.0.x, q.0.x, epsilon = TOL);
        assert_abs_diff_eq!(result.0.y, q.0.y, epsilon = TOL);
        assert_abs_diff_eq!(result.0.z, q.0.z, epsilon = TOL);
        assert_abs_diff_eq!(result.0.w, q.0.w, epsilon = TOL);
    }

    #[test]
    fn test_quaternion_scalar_multiplication() {
        let q = Quaternion::new(1.0, -2.0, 3.0, 4.0) * 0.5;

        assert_abs_diff_eq!(q.x, 0.5, epsilon = TOL);
        assert_abs_diff_eq!(q.y, -1.0, epsilon = TOL);
        assert_abs_diff_eq!(q.z, 1.5, epsilon = TOL);
        assert_abs_diff_eq!(q.w, 2.0, epsilon = TOL);
    }

    #[test]
    fn test_quaternion_from_axis_angle() {
        let axis_angle = AxisAngle::new(PI / 2.0, Vector3::new(0.0, 0.0, 1.0)).unwrap();
        let q = UnitQuaternion::from(&axis_angle);

        assert_abs_diff_eq!(q.0.x, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(q.0.y, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(
            q.0.z,
            FRAC_1_SQRT_2,
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            q.0.w,
            FRAC_1_SQRT_2,
            epsilon = TOL
        );
    }
}
