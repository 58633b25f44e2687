//! 3D Rotation Mathematics
//!
//! This crate provides the four interchangeable rotation representations used
//! by rot3d and the conversions between them.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat3`] - 3x3 rotation matrix (row-major, column vectors)
//! - [`Mat4`] - 4x4 homogeneous matrix with a rotation block
//! - [`Quat`] - quaternion `w + xi + yj + zk`
//!
//! ## Rotation Forms
//!
//! - [`AxisAngle`] - angle about a unit axis
//! - [`EulerAngles`] - pitch (X), then yaw (Y), then roll (Z)
//! - [`Rotate3`] - trait for applying any of the above to a vector
//!
//! Raw conversions trust their input. The `try_*` variants validate it and
//! report problems through [`RotationError`].

pub mod approx;
mod error;
mod vec3;
pub mod mat3;
pub mod mat4;
pub mod quat;
pub mod axis_angle;
pub mod euler;
pub mod rotate;

pub use approx::{clamp_unit, close_eq, EPSILON};
pub use error::RotationError;
pub use vec3::Vec3;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use quat::Quat;
pub use axis_angle::AxisAngle;
pub use euler::{EulerAngles, EulerSolutions};
pub use rotate::Rotate3;
