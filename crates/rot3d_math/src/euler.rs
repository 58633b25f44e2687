//! Pitch / yaw / roll Euler angles
//!
//! Pitch rotates about X, yaw about Y and roll about Z, applied in that order:
//! `R = Rz(roll) · Ry(yaw) · Rx(pitch)`.
//!
//! Extraction is not unique. Away from gimbal lock every matrix has two
//! solutions, related by `yaw' = π - yaw`; [`EulerAngles::from_mat3`] returns
//! the one with `yaw ∈ [-π/2, π/2]` and [`EulerAngles::solutions`] returns
//! both. At `yaw = ±π/2` pitch and roll act about the same axis, so roll is
//! pinned to zero and the combined angle is reported as pitch. Lock is
//! detected from `cos(yaw)` itself, so yaw a hair away from ±π/2 still
//! extracts exactly.

use std::f64::consts::{FRAC_PI_2, PI};

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::approx::EPSILON;
use crate::{Mat3, Mat4, Quat, RotationError, Vec3};

/// Euler angles in radians
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about X, applied first
    pub pitch: f64,
    /// Rotation about Y, applied second
    pub yaw: f64,
    /// Rotation about Z, applied last
    pub roll: f64,
}

/// Both Euler decompositions of one rotation matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EulerSolutions {
    /// Solution with `yaw ∈ [-π/2, π/2]`
    pub primary: EulerAngles,
    /// Solution with `yaw' = π - yaw`, or `None` in gimbal lock
    pub alternate: Option<EulerAngles>,
}

impl EulerAngles {
    pub const ZERO: Self = Self { pitch: 0.0, yaw: 0.0, roll: 0.0 };

    #[inline]
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Create from angles in degrees
    pub fn from_degrees(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self::new(pitch.to_radians(), yaw.to_radians(), roll.to_radians())
    }

    /// Angles in degrees as `[pitch, yaw, roll]`
    pub fn to_degrees(self) -> [f64; 3] {
        [self.pitch.to_degrees(), self.yaw.to_degrees(), self.roll.to_degrees()]
    }

    /// Rotation matrix `Rz(roll) · Ry(yaw) · Rx(pitch)` in closed form
    pub fn to_mat3(self) -> Mat3 {
        let (sx, cx) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        let (sz, cz) = self.roll.sin_cos();

        Mat3::from_rows(
            [cz * cy, cz * sy * sx - sz * cx, sz * sx + cz * cx * sy],
            [sz * cy, cz * cx + sx * sy * sz, sz * sy * cx - cz * sx],
            [-sy, sx * cy, cy * cx],
        )
    }

    /// Homogeneous rotation matrix
    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_mat3(&self.to_mat3())
    }

    /// Unit quaternion `roll · yaw · pitch`
    pub fn to_quat(self) -> Quat {
        Quat::from_axis_angle(self.roll, Vec3::Z)
            * Quat::from_axis_angle(self.yaw, Vec3::Y)
            * Quat::from_axis_angle(self.pitch, Vec3::X)
    }

    /// Primary Euler decomposition of a rotation matrix
    pub fn from_mat3(r: &Mat3) -> Self {
        Self::solutions(r).primary
    }

    /// Checked [`EulerAngles::from_mat3`]
    pub fn try_from_mat3(r: &Mat3) -> Result<Self, RotationError> {
        if !r.is_rotation() {
            return Err(RotationError::NotRotation);
        }
        Ok(Self::from_mat3(r))
    }

    /// Primary Euler decomposition of the rotation block
    pub fn from_mat4(r: &Mat4) -> Self {
        Self::from_mat3(&r.to_mat3())
    }

    /// Euler angles of a unit quaternion, through its matrix
    pub fn from_quat(q: Quat) -> Self {
        Self::from_mat3(&q.to_mat3())
    }

    /// Every Euler decomposition of a rotation matrix
    pub fn solutions(r: &Mat3) -> EulerSolutions {
        let m = &r.m;
        // -sin(yaw)
        let r31 = m[2][0];
        // |cos(yaw)|, from the first column
        let cy = m[0][0].hypot(m[1][0]);

        if cy < EPSILON {
            if r31 > 0.0 {
                log::trace!("euler from matrix: gimbal lock at yaw = -90°");
                let primary = Self::new((-m[0][1]).atan2(-m[0][2]), -FRAC_PI_2, 0.0);
                return EulerSolutions { primary, alternate: None };
            }
            log::trace!("euler from matrix: gimbal lock at yaw = +90°");
            let primary = Self::new(m[0][1].atan2(m[0][2]), FRAC_PI_2, 0.0);
            return EulerSolutions { primary, alternate: None };
        }

        // Same as -asin(r31) for a rotation, without asin's loss near ±1
        let yaw = (-r31).atan2(cy);
        let mut alt_yaw = PI - yaw;
        if alt_yaw > PI {
            alt_yaw -= 2.0 * PI;
        }

        EulerSolutions {
            primary: Self::with_yaw(m, yaw, cy),
            alternate: Some(Self::with_yaw(m, alt_yaw, -cy)),
        }
    }

    /// Pitch and roll that complete a known, non-degenerate yaw with cosine `cy`
    fn with_yaw(m: &[[f64; 3]; 3], yaw: f64, cy: f64) -> Self {
        Self::new(
            (m[2][1] / cy).atan2(m[2][2] / cy),
            yaw,
            (m[1][0] / cy).atan2(m[0][0] / cy),
        )
    }
}

impl Mat3 {
    /// Rotation matrix of Euler angles in radians
    pub fn from_euler(pitch: f64, yaw: f64, roll: f64) -> Self {
        EulerAngles::new(pitch, yaw, roll).to_mat3()
    }

    /// Primary Euler decomposition
    pub fn to_euler(&self) -> EulerAngles {
        EulerAngles::from_mat3(self)
    }
}

impl Mat4 {
    /// Homogeneous rotation matrix of Euler angles in radians
    pub fn from_euler(pitch: f64, yaw: f64, roll: f64) -> Self {
        EulerAngles::new(pitch, yaw, roll).to_mat4()
    }

    /// Primary Euler decomposition of the rotation block
    pub fn to_euler(&self) -> EulerAngles {
        EulerAngles::from_mat4(self)
    }
}

impl Quat {
    /// Unit quaternion of Euler angles in radians
    pub fn from_euler(pitch: f64, yaw: f64, roll: f64) -> Self {
        EulerAngles::new(pitch, yaw, roll).to_quat()
    }

    /// Euler angles of this unit quaternion
    pub fn to_euler(self) -> EulerAngles {
        EulerAngles::from_quat(self)
    }
}
