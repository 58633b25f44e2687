//! Quaternion type and quaternion ⇄ matrix conversion
//!
//! A quaternion `w + xi + yj + zk` represents a rotation only when it has unit
//! norm: `w = cos(θ/2)` and `(x, y, z) = sin(θ/2) * axis`. Non-unit
//! quaternions are still valid for the algebra (add, scale, multiply) and must
//! be normalized explicitly before being used as rotations.
//!
//! `q` and `-q` describe the same rotation; use [`Quat::same_rotation`] to
//! compare rotations rather than components.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::approx::{close_eq, EPSILON};
use crate::{Mat3, Mat4, RotationError, Vec3};

/// Quaternion with scalar part `w` and vector part `(x, y, z)`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };
    /// Additive zero; not a rotation
    pub const ZERO: Self = Self { w: 0.0, x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new quaternion
    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Create from a `[w, x, y, z]` array
    #[inline]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Components as a `[w, x, y, z]` array
    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Pure quaternion `(0, v)`
    #[inline]
    pub fn from_vector(v: Vec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// The vector part
    #[inline]
    pub fn vector(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// 4D dot product
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn norm_squared(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// True when the norm is within EPSILON of 1
    #[inline]
    pub fn is_unit(self) -> bool {
        close_eq(self.norm(), 1.0, EPSILON)
    }

    /// Scale to unit norm, failing for a (near) zero quaternion
    pub fn try_normalized(self) -> Result<Self, RotationError> {
        let n = self.norm();
        if n < EPSILON || !n.is_finite() {
            return Err(RotationError::DegenerateQuaternion);
        }
        Ok(self / n)
    }

    /// Conjugate `(w, -x, -y, -z)`; the inverse for unit quaternions
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse `conj(q) / |q|²`
    pub fn try_inverse(self) -> Result<Self, RotationError> {
        let n2 = self.norm_squared();
        if n2 < EPSILON * EPSILON || !n2.is_finite() {
            return Err(RotationError::DegenerateQuaternion);
        }
        Ok(self.conjugate() / n2)
    }

    /// Add `value` to every component
    #[inline]
    pub fn add_scalar(self, value: f64) -> Self {
        Self::new(self.w + value, self.x + value, self.y + value, self.z + value)
    }

    /// Component-wise comparison within `eps`
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        close_eq(self.w, other.w, eps)
            && close_eq(self.x, other.x, eps)
            && close_eq(self.y, other.y, eps)
            && close_eq(self.z, other.z, eps)
    }

    /// True when both describe the same rotation (`q ≈ p` or `q ≈ -p`)
    pub fn same_rotation(self, other: Self, eps: f64) -> bool {
        self.approx_eq(other, eps) || self.approx_eq(-other, eps)
    }

    /// Flip into the `w >= 0` hemisphere
    #[inline]
    pub fn canonical(self) -> Self {
        if self.w < 0.0 {
            -self
        } else {
            self
        }
    }

    /// Rotate `v` with the sandwich product `q·(0,v)·q⁻¹`, using the true inverse.
    ///
    /// Fails on a zero quaternion, and when the product's scalar part is not
    /// zero within EPSILON (scaled by `|v|`), which only happens for NaN or
    /// infinite input.
    pub fn try_rotate(self, v: Vec3) -> Result<Vec3, RotationError> {
        let inv = self.try_inverse()?;
        let r = self * Self::from_vector(v) * inv;
        let tolerance = EPSILON * v.length().max(1.0);
        if !close_eq(r.w, 0.0, tolerance) {
            return Err(RotationError::NonPureResult { w: r.w });
        }
        Ok(r.vector())
    }

    /// Rotation matrix for a unit quaternion
    pub fn to_mat3(self) -> Mat3 {
        let Self { w, x, y, z } = self;

        Mat3::from_rows(
            [1.0 - 2.0 * y * y - 2.0 * z * z, 2.0 * x * y - 2.0 * w * z, 2.0 * x * z + 2.0 * w * y],
            [2.0 * x * y + 2.0 * w * z, 1.0 - 2.0 * x * x - 2.0 * z * z, 2.0 * y * z - 2.0 * w * x],
            [2.0 * x * z - 2.0 * w * y, 2.0 * y * z + 2.0 * w * x, 1.0 - 2.0 * x * x - 2.0 * y * y],
        )
    }

    /// Homogeneous rotation matrix for a unit quaternion
    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_mat3(&self.to_mat3())
    }

    /// Quaternion of a rotation matrix.
    ///
    /// The matrix is assumed to be a rotation; see [`Quat::try_from_mat3`] for
    /// the checked form. `trace + 1 = 4w²`. When that term is the largest of
    /// `4w², 4x², 4y², 4z²` the trace formula is used; otherwise the component
    /// matching the largest diagonal entry is taken from its square root and
    /// the rest are divided by it.
    pub fn from_mat3(r: &Mat3) -> Self {
        let m = &r.m;
        let trace = r.trace() + 1.0;
        let diag_terms = [
            1.0 + m[0][0] - m[1][1] - m[2][2],
            1.0 + m[1][1] - m[0][0] - m[2][2],
            1.0 + m[2][2] - m[0][0] - m[1][1],
        ];

        if diag_terms.iter().all(|t| trace >= *t) {
            let s = 0.5 / trace.sqrt();
            return Self::new(
                0.25 / s,
                (m[2][1] - m[1][2]) * s,
                (m[0][2] - m[2][0]) * s,
                (m[1][0] - m[0][1]) * s,
            );
        }

        let mut max_col = 0;
        let mut champ = m[0][0];
        for col in 1..3 {
            if m[col][col] > champ {
                champ = m[col][col];
                max_col = col;
            }
        }
        log::trace!("quaternion from matrix: trace {} too small, pivot column {}", trace, max_col);

        // s = 4 * dominant component
        let s = 2.0 * diag_terms[max_col].sqrt();
        match max_col {
            0 => Self::new(
                (m[2][1] - m[1][2]) / s,
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
            ),
            1 => Self::new(
                (m[0][2] - m[2][0]) / s,
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
            ),
            _ => Self::new(
                (m[1][0] - m[0][1]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
            ),
        }
    }

    /// Checked [`Quat::from_mat3`]: fails with `NotRotation` unless the
    /// matrix is orthonormal with determinant 1
    pub fn try_from_mat3(r: &Mat3) -> Result<Self, RotationError> {
        if !r.is_rotation() {
            return Err(RotationError::NotRotation);
        }
        Ok(Self::from_mat3(r))
    }

    /// Quaternion of the rotation block of a homogeneous matrix
    pub fn from_mat4(r: &Mat4) -> Self {
        Self::from_mat3(&r.to_mat3())
    }

    /// Checked [`Quat::from_mat4`]
    pub fn try_from_mat4(r: &Mat4) -> Result<Self, RotationError> {
        if !r.is_rotation() {
            return Err(RotationError::NotRotation);
        }
        Ok(Self::from_mat4(r))
    }
}

impl Mat3 {
    /// Rotation matrix of a unit quaternion
    pub fn from_quat(q: Quat) -> Self {
        q.to_mat3()
    }
}

impl Mat4 {
    /// Homogeneous rotation matrix of a unit quaternion
    pub fn from_quat(q: Quat) -> Self {
        q.to_mat4()
    }
}

// Operator overloads

impl std::ops::Add for Quat {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(self.w + o.w, self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl std::ops::AddAssign for Quat {
    #[inline]
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl std::ops::Sub for Quat {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(self.w - o.w, self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl std::ops::SubAssign for Quat {
    #[inline]
    fn sub_assign(&mut self, o: Self) {
        *self = *self - o;
    }
}

/// Hamilton product. Not commutative: `a * b` applies `b` first, then `a`.
impl std::ops::Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, o: Self) -> Self {
        Self::new(
            self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
            self.w * o.x + self.x * o.w + self.y * o.z - self.z * o.y,
            self.w * o.y + self.y * o.w - self.x * o.z + self.z * o.x,
            self.w * o.z + self.z * o.w + self.x * o.y - self.y * o.x,
        )
    }
}

impl std::ops::MulAssign for Quat {
    #[inline]
    fn mul_assign(&mut self, o: Self) {
        *self = *self * o;
    }
}

impl std::ops::Mul<f64> for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }
}

impl std::ops::MulAssign<f64> for Quat {
    #[inline]
    fn mul_assign(&mut self, s: f64) {
        *self = *self * s;
    }
}

impl std::ops::Div<f64> for Quat {
    type Output = Self;
    #[inline]
    fn div(self, s: f64) -> Self {
        Self::new(self.w / s, self.x / s, self.y / s, self.z / s)
    }
}

impl std::ops::Neg for Quat {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}
