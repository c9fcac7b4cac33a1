pub mod axis_angle;
pub mod exp_coords;
pub mod quaternion;

pub mod prelude {
    pub use crate::axis_angle::*;
    pub use crate::exp_coords::*;
    pub use crate::quaternion::*;
}
