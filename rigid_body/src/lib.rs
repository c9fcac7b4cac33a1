pub mod pose;

use attitude::axis_angle::AxisAngle;
use attitude::exp_coords::{subtract_quats, SMALL_ANGLE_TOL};
use attitude::quaternion::UnitQuaternion;
use nalgebra::{SVector, Vector3};
use serde::{Deserialize, Serialize};

/// Gravity magnitude [m/s^2]
pub const G_VAL: f64 = 9.80665;
/// Air density [kg/m^3]
pub const RHO_VAL: f64 = 1.2;
/// ENU gravity vector
pub const G_VEC: Vector3<f64> = Vector3::new(0.0, 0.0, -G_VAL);

pub type StateVector = SVector<f64, 15>;

/// Basic rigid body state representation for an error-state estimator.
///
/// The state is a unit quaternion plus a fixed-layout 15 element vector
/// partitioned into angular velocity, velocity, chi, position and
/// acceleration. The chi slice holds pending attitude perturbations in
/// exponential coordinates that have not yet been absorbed into `quat`:
/// either chi is zero and `quat` is current, or chi is non-zero and `quat`
/// is stale until [`chi_to_quat`](RigidBodyState::chi_to_quat) folds it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyState {
    pub quat: UnitQuaternion,
    pub vec: StateVector,
    pub utime: i64,
}

impl RigidBodyState {
    pub const ANGULAR_VELOCITY_IND: usize = 0;
    pub const VELOCITY_IND: usize = 3;
    pub const CHI_IND: usize = 6;
    pub const POSITION_IND: usize = 9;
    pub const ACCELERATION_IND: usize = 12;
    pub const BASIC_NUM_STATES: usize = 15;

    /// Creates a zero state with identity orientation.
    pub fn new() -> Self {
        Self {
            quat: UnitQuaternion::IDENTITY,
            vec: StateVector::zeros(),
            utime: 0,
        }
    }

    /// Creates a state from a raw state vector. Any chi carried in the
    /// vector is folded into the quaternion immediately.
    pub fn from_vector(vec: StateVector) -> Self {
        let mut state = Self {
            quat: UnitQuaternion::IDENTITY,
            vec,
            utime: 0,
        };
        state.chi_to_quat();
        state
    }

    /// Creates a state from a raw state vector and a quaternion. The chi
    /// slice is kept as-is, not folded.
    pub fn from_parts(vec: StateVector, quat: UnitQuaternion) -> Self {
        Self { quat, vec, utime: 0 }
    }

    /// Creates a state from a raw slice, which must have exactly
    /// [`BASIC_NUM_STATES`](Self::BASIC_NUM_STATES) elements.
    pub fn from_slice(v: &[f64]) -> Self {
        assert_eq!(
            v.len(),
            Self::BASIC_NUM_STATES,
            "rigid body state vector must have exactly {} elements",
            Self::BASIC_NUM_STATES
        );
        Self::from_vector(StateVector::from_column_slice(v))
    }

    pub fn angular_velocity(&self) -> Vector3<f64> {
        self.vec
            .fixed_rows::<3>(Self::ANGULAR_VELOCITY_IND)
            .into_owned()
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.vec
            .fixed_rows::<3>(Self::VELOCITY_IND)
            .into_owned()
    }

    pub fn chi(&self) -> Vector3<f64> {
        self.vec
            .fixed_rows::<3>(Self::CHI_IND)
            .into_owned()
    }

    pub fn position(&self) -> Vector3<f64> {
        self.vec
            .fixed_rows::<3>(Self::POSITION_IND)
            .into_owned()
    }

    pub fn acceleration(&self) -> Vector3<f64> {
        self.vec
            .fixed_rows::<3>(Self::ACCELERATION_IND)
            .into_owned()
    }

    pub fn set_angular_velocity(&mut self, v: &Vector3<f64>) {
        self.vec
            .fixed_rows_mut::<3>(Self::ANGULAR_VELOCITY_IND)
            .copy_from(v);
    }

    pub fn set_velocity(&mut self, v: &Vector3<f64>) {
        self.vec
            .fixed_rows_mut::<3>(Self::VELOCITY_IND)
            .copy_from(v);
    }

    pub fn set_chi(&mut self, v: &Vector3<f64>) {
        self.vec
            .fixed_rows_mut::<3>(Self::CHI_IND)
            .copy_from(v);
    }

    pub fn set_position(&mut self, v: &Vector3<f64>) {
        self.vec
            .fixed_rows_mut::<3>(Self::POSITION_IND)
            .copy_from(v);
    }

    pub fn set_acceleration(&mut self, v: &Vector3<f64>) {
        self.vec
            .fixed_rows_mut::<3>(Self::ACCELERATION_IND)
            .copy_from(v);
    }

    pub fn orientation(&self) -> &UnitQuaternion {
        &self.quat
    }

    pub fn orientation_mut(&mut self) -> &mut UnitQuaternion {
        &mut self.quat
    }

    /// phi, theta, psi (roll, pitch, yaw)
    pub fn euler_angles(&self) -> Vector3<f64> {
        let q = &self.quat.0;
        let phi = (2.0 * (q.w * q.x + q.y * q.z)).atan2(1.0 - 2.0 * (q.x * q.x + q.y * q.y));
        let theta = (2.0 * (q.w * q.y - q.z * q.x))
            .clamp(-1.0, 1.0)
            .asin();
        let psi = (2.0 * (q.w * q.z + q.x * q.y)).atan2(1.0 - 2.0 * (q.y * q.y + q.z * q.z));
        Vector3::new(phi, theta, psi)
    }

    /// phi, theta, psi (roll, pitch, yaw)
    pub fn set_quat_euler_angles(&mut self, eulers: &Vector3<f64>) {
        // unwraps are safe, the axes are unit vectors
        let qx = UnitQuaternion::from(&AxisAngle::new(eulers[0], Vector3::x()).unwrap());
        let qy = UnitQuaternion::from(&AxisAngle::new(eulers[1], Vector3::y()).unwrap());
        let qz = UnitQuaternion::from(&AxisAngle::new(eulers[2], Vector3::z()).unwrap());
        self.quat = qz * qy * qx;
    }

    /// Folds the pending chi perturbation into the quaternion as a body
    /// frame rotation and zeroes chi. Chi at or below the small angle
    /// tolerance is left untouched so a noise-level vector is never
    /// normalized into a rotation axis.
    pub fn chi_to_quat(&mut self) {
        let chi = self.chi();
        let chi_norm = chi.norm();
        if chi_norm > SMALL_ANGLE_TOL {
            // unwrap is safe, the norm check guarantees a normalizable axis
            let dquat = UnitQuaternion::from(&AxisAngle::new(chi_norm, chi / chi_norm).unwrap());
            self.quat = self.quat * dquat;
            self.set_chi(&Vector3::zeros());
        }
    }

    /// Moves the whole attitude into the chi slice as exponential
    /// coordinates and resets the quaternion to identity. Any chi pending
    /// at call time is overwritten, callers must fold first if they need it.
    pub fn quat_to_chi(&mut self) {
        let chi = subtract_quats(&self.quat, &UnitQuaternion::IDENTITY);
        self.set_chi(&chi);
        self.quat = UnitQuaternion::IDENTITY;
    }

    /// Adds a state on the right (postmultiplies the orientation).
    ///
    /// The combined chi is folded before the quaternion product, so the
    /// order of operations here is load bearing.
    pub fn add_state(&mut self, state_to_add: &RigidBodyState) {
        self.vec += state_to_add.vec;
        self.chi_to_quat();
        self.quat = self.quat * state_to_add.quat;
    }

    /// Subtracts a state (premultiplies the inverse of
    /// `state_to_subtract.quat`).
    pub fn subtract_state(&mut self, state_to_subtract: &RigidBodyState) {
        self.vec -= state_to_subtract.vec;
        self.quat = state_to_subtract
            .quat
            .inv()
            * self.quat;
    }

    /// Reports whether any of the 15 vector elements is NaN. The quaternion
    /// is not scanned and Inf does not count.
    pub fn has_nan(&self) -> bool {
        self.vec
            .iter()
            .any(|e| e.is_nan())
    }
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self::new()
    }
}
