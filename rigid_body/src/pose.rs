//! Boundary types for exchanging pose samples with external producers and
//! consumers. These are plain field copies, no transformation happens here
//! beyond the quaternion component reordering.

use crate::RigidBodyState;
use attitude::quaternion::{Quaternion, UnitQuaternion};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A full rigid body pose sample. The orientation is scalar-first,
/// `[w, x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseMessage {
    pub utime: i64,
    pub pos: [f64; 3],
    pub vel: [f64; 3],
    pub orientation: [f64; 4],
    pub rotation_rate: [f64; 3],
    pub accel: [f64; 3],
}

/// The reduced position plus rotation projection of a pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformMessage {
    pub trans_vec: [f64; 3],
    pub rot_quat: [f64; 4],
}

/// Reorders quaternion components from the internal `x, y, z, w` layout to
/// the scalar-first `[w, x, y, z]` wire order.
pub fn quaternion_to_bot_double(quat: &UnitQuaternion) -> [f64; 4] {
    [quat.0.w, quat.0.x, quat.0.y, quat.0.z]
}

/// Reorders scalar-first `[w, x, y, z]` wire components into the internal
/// layout. The input is expected to already be a unit quaternion and is
/// copied verbatim, not renormalized.
pub fn bot_double_to_quaternion(bot_quat: &[f64; 4]) -> UnitQuaternion {
    UnitQuaternion(Quaternion::new(
        bot_quat[1],
        bot_quat[2],
        bot_quat[3],
        bot_quat[0],
    ))
}

impl From<&PoseMessage> for RigidBodyState {
    fn from(pose: &PoseMessage) -> Self {
        let mut state = RigidBodyState::new();
        state.set_angular_velocity(&Vector3::from(pose.rotation_rate));
        state.set_velocity(&Vector3::from(pose.vel));
        state.set_position(&Vector3::from(pose.pos));
        state.set_acceleration(&Vector3::from(pose.accel));
        state.quat = bot_double_to_quaternion(&pose.orientation);
        state.utime = pose.utime;
        state
    }
}

impl RigidBodyState {
    pub fn to_pose(&self) -> PoseMessage {
        PoseMessage {
            utime: self.utime,
            pos: self
                .position()
                .into(),
            vel: self
                .velocity()
                .into(),
            orientation: quaternion_to_bot_double(&self.quat),
            rotation_rate: self
                .angular_velocity()
                .into(),
            accel: self
                .acceleration()
                .into(),
        }
    }

    pub fn to_transform(&self) -> TransformMessage {
        TransformMessage {
            trans_vec: self
                .position()
                .into(),
            rot_quat: quaternion_to_bot_double(&self.quat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_double_round_trip_is_exact() {
        let bot_quat = [0.5, -0.5, 0.5, 0.5];
        let quat = bot_double_to_quaternion(&bot_quat);
        let result = quaternion_to_bot_double(&quat);
        assert_eq!(result, bot_quat);
    }

    #[test]
    fn test_bot_double_component_order() {
        let quat = bot_double_to_quaternion(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(quat.0.w, 1.0);
        assert_eq!(quat.0.x, 0.0);

        let quat = bot_double_to_quaternion(&[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(quat.0.w, 0.0);
        assert_eq!(quat.0.x, 1.0);
    }

    #[test]
    fn test_pose_round_trip_is_bitwise() {
        let pose = PoseMessage {
            utime: 1234567,
            pos: [1.0, 2.0, 3.0],
            vel: [0.1, 0.2, 0.3],
            orientation: [0.5, 0.5, -0.5, 0.5],
            rotation_rate: [0.01, 0.02, 0.03],
            accel: [-0.4, 0.5, 9.8],
        };

        let state = RigidBodyState::from(&pose);
        let result = state.to_pose();

        assert_eq!(result, pose);
    }

    #[test]
    fn test_pose_construction_leaves_chi_zero() {
        let pose = PoseMessage {
            utime: 42,
            pos: [1.0, 0.0, 0.0],
            vel: [0.0; 3],
            orientation: [1.0, 0.0, 0.0, 0.0],
            rotation_rate: [0.0; 3],
            accel: [0.0; 3],
        };
        let state = RigidBodyState::from(&pose);
        assert_eq!(state.chi(), nalgebra::Vector3::zeros());
        assert_eq!(state.utime, 42);
    }

    #[test]
    fn test_to_transform_projects_position_and_rotation() {
        let pose = PoseMessage {
            utime: 7,
            pos: [4.0, 5.0, 6.0],
            vel: [1.0; 3],
            orientation: [0.5, 0.5, 0.5, -0.5],
            rotation_rate: [2.0; 3],
            accel: [3.0; 3],
        };
        let state = RigidBodyState::from(&pose);
        let transform = state.to_transform();

        assert_eq!(transform.trans_vec, pose.pos);
        assert_eq!(transform.rot_quat, pose.orientation);
    }
}
