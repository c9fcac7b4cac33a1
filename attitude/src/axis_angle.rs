use crate::quaternion::UnitQuaternion;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, Copy, Clone)]
pub enum AxisAngleErrors {
    #[error("magnitude of the axis is too small, should be normalizable to a magnitude of 1.0")]
    ZeroMagnitudeAxis,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    pub angle: f64,
    pub axis: Vector3<f64>,
}

impl AxisAngle {
    const IDENTITY: Self = Self { angle: 0.0, axis: Vector3::new(1.0, 0.0, 0.0) };

    pub fn new(angle: f64, axis: Vector3<f64>) -> Result<Self, AxisAngleErrors> {
        if axis.norm() < 1e-12 {
            return Err(AxisAngleErrors::ZeroMagnitudeAxis);
        }
        let axis = axis.normalize();
        Ok(Self { angle, axis })
    }
}

impl From<&UnitQuaternion> for AxisAngle {
    /// Shortest-arc extraction, angle is always in [0, pi].
    fn from(quat: &UnitQuaternion) -> Self {
        // q and -q are the same rotation, pick the cover with w >= 0
        let q = if quat.0.w < 0.0 { -*quat } else { *quat };
        let v = Vector3::new(q.0.x, q.0.y, q.0.z);
        let sin_half = v.norm();
        let angle = 2.0 * sin_half.atan2(q.0.w);
        if sin_half < 1e-12 {
            // angle is (numerically) zero, axis is arbitrary
            return Self { angle, axis: Self::IDENTITY.axis };
        }
        Self { angle, axis: v / sin_half }
    }
}
