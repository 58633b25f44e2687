//! Axis-angle rotations and their matrix / quaternion conversions
//!
//! Forward conversion to a matrix uses Rodrigues' formula. The inverse reads
//! the angle from the trace and the axis from the antisymmetric part, with
//! two closed-form special cases:
//!
//! - **0°**: the antisymmetric part vanishes and the matrix is the identity.
//!   The axis is arbitrary and reported as +X.
//! - **180°**: the antisymmetric part vanishes but the matrix is symmetric and
//!   not the identity. The axis comes from the diagonal, `M + I = 2·a·aᵀ`,
//!   pivoting on the largest diagonal entry.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::approx::{clamp_unit, EPSILON};
use crate::{Mat3, Mat4, Quat, RotationError, Vec3};

/// Rotation by `angle` radians about a unit `axis` (right-hand rule)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct AxisAngle {
    /// Angle in radians
    pub angle: f64,
    /// Unit rotation axis
    pub axis: Vec3,
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AxisAngle {
    /// Zero rotation, reported about +X
    pub const IDENTITY: Self = Self { angle: 0.0, axis: Vec3::X };

    /// Create an axis-angle rotation.
    ///
    /// The axis must already be unit length; nothing here normalizes it and a
    /// non-unit axis produces a non-orthonormal matrix. Use
    /// [`AxisAngle::try_new`] at API boundaries.
    #[inline]
    pub const fn new(angle: f64, axis: Vec3) -> Self {
        Self { angle, axis }
    }

    /// Create an axis-angle rotation, rejecting a non-unit axis
    pub fn try_new(angle: f64, axis: Vec3) -> Result<Self, RotationError> {
        if !axis.is_unit() {
            return Err(RotationError::NonUnitAxis { length: axis.length() });
        }
        Ok(Self::new(angle, axis))
    }

    /// Rotation matrix (Rodrigues' formula)
    pub fn to_mat3(self) -> Mat3 {
        let Vec3 { x, y, z } = self.axis;
        let (s, c) = self.angle.sin_cos();
        let t = 1.0 - c;

        Mat3::from_rows(
            [c + x * x * t, x * y * t - z * s, x * z * t + y * s],
            [y * x * t + z * s, c + y * y * t, y * z * t - x * s],
            [z * x * t - y * s, z * y * t + x * s, c + z * z * t],
        )
    }

    /// Homogeneous rotation matrix
    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_mat3(&self.to_mat3())
    }

    /// Unit quaternion `(cos θ/2, sin θ/2 · axis)`
    pub fn to_quat(self) -> Quat {
        let (s, c) = (self.angle * 0.5).sin_cos();
        Quat::new(c, self.axis.x * s, self.axis.y * s, self.axis.z * s)
    }

    /// Axis-angle of a rotation matrix.
    ///
    /// The angle is `atan2(sin θ, cos θ)` with the sine taken from the
    /// antisymmetric part and the cosine from the trace. Returns an angle in
    /// `[0, π]`. At exactly 180° either axis sign is a valid answer.
    pub fn from_mat3(r: &Mat3) -> Self {
        let m = &r.m;

        let antisymmetric = [m[0][1] - m[1][0], m[0][2] - m[2][0], m[1][2] - m[2][1]];
        if antisymmetric.iter().all(|d| d.abs() < EPSILON) {
            if r.is_identity() {
                log::trace!("axis-angle from matrix: identity, reporting +X axis");
                return Self::IDENTITY;
            }
            log::trace!("axis-angle from matrix: half turn");
            return Self::new(PI, half_turn_axis(r));
        }

        // 2·sin(θ)·axis
        let scaled_axis = Vec3::new(m[2][1] - m[1][2], m[0][2] - m[2][0], m[1][0] - m[0][1]);
        let cos = clamp_unit((r.trace() - 1.0) / 2.0);
        // acos(cos) loses precision near 0 and π; the sine keeps it
        let angle = (0.5 * scaled_axis.length()).atan2(cos);
        Self::new(angle, scaled_axis.normalized())
    }

    /// Checked [`AxisAngle::from_mat3`]
    pub fn try_from_mat3(r: &Mat3) -> Result<Self, RotationError> {
        if !r.is_rotation() {
            return Err(RotationError::NotRotation);
        }
        Ok(Self::from_mat3(r))
    }

    /// Axis-angle of the rotation block of a homogeneous matrix
    pub fn from_mat4(r: &Mat4) -> Self {
        Self::from_mat3(&r.to_mat3())
    }

    /// Checked [`AxisAngle::from_mat4`]
    pub fn try_from_mat4(r: &Mat4) -> Result<Self, RotationError> {
        if !r.is_rotation() {
            return Err(RotationError::NotRotation);
        }
        Ok(Self::from_mat4(r))
    }

    /// Axis-angle of a unit quaternion.
    ///
    /// `q` is first moved to the `w >= 0` hemisphere so the angle lies in
    /// `[0, π]`. The half-angle sine is the length of the vector part; below
    /// EPSILON the rotation is the identity and the axis is reported as +X.
    /// For a unit quaternion `2·atan2(sin, w)` equals `2·acos(w)` but keeps
    /// full precision for small angles.
    pub fn from_quat(q: Quat) -> Self {
        let q = q.canonical();
        let v = q.vector();
        let sin_half = v.length();
        if sin_half < EPSILON {
            log::trace!("axis-angle from quaternion: no rotation, reporting +X axis");
            return Self::IDENTITY;
        }
        let angle = 2.0 * sin_half.atan2(q.w);
        Self::new(angle, v / sin_half)
    }

    /// Checked [`AxisAngle::from_quat`]: the quaternion must be unit length
    pub fn try_from_quat(q: Quat) -> Result<Self, RotationError> {
        if !q.is_unit() {
            return Err(RotationError::NonUnitQuaternion { norm: q.norm() });
        }
        Ok(Self::from_quat(q))
    }
}

/// Axis of a symmetric, non-identity rotation matrix (angle π)
fn half_turn_axis(r: &Mat3) -> Vec3 {
    let m = &r.m;
    let xx = (m[0][0] + 1.0) / 2.0;
    let yy = (m[1][1] + 1.0) / 2.0;
    let zz = (m[2][2] + 1.0) / 2.0;
    let xy = (m[0][1] + m[1][0]) / 4.0;
    let xz = (m[0][2] + m[2][0]) / 4.0;
    let yz = (m[1][2] + m[2][1]) / 4.0;

    if xx > yy && xx > zz {
        if xx < EPSILON {
            return Vec3::new(0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        }
        let x = xx.sqrt();
        Vec3::new(x, xy / x, xz / x)
    } else if yy > zz {
        if yy < EPSILON {
            return Vec3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2);
        }
        let y = yy.sqrt();
        Vec3::new(xy / y, y, yz / y)
    } else {
        if zz < EPSILON {
            return Vec3::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0);
        }
        let z = zz.sqrt();
        Vec3::new(xz / z, yz / z, z)
    }
}

impl Mat3 {
    /// Rotation matrix of `angle` radians about a unit `axis`
    pub fn from_axis_angle(angle: f64, axis: Vec3) -> Self {
        AxisAngle::new(angle, axis).to_mat3()
    }

    /// Axis-angle of this rotation matrix
    pub fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from_mat3(self)
    }
}

impl Mat4 {
    /// Homogeneous rotation matrix of `angle` radians about a unit `axis`
    pub fn from_axis_angle(angle: f64, axis: Vec3) -> Self {
        AxisAngle::new(angle, axis).to_mat4()
    }

    /// Axis-angle of the rotation block
    pub fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from_mat4(self)
    }
}

impl Quat {
    /// Unit quaternion of `angle` radians about a unit `axis`
    pub fn from_axis_angle(angle: f64, axis: Vec3) -> Self {
        AxisAngle::new(angle, axis).to_quat()
    }

    /// Axis-angle of this unit quaternion
    pub fn to_axis_angle(self) -> AxisAngle {
        AxisAngle::from_quat(self)
    }
}
