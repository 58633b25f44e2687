//! 3x3 matrix type
//!
//! Storage is row-major: `m[row][col]`. Rotation matrices act on column
//! vectors, `v' = M * v`. The column-major dumps at the bottom of the impl are
//! the OpenGL-facing view of the same data.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::approx::{close_eq, EPSILON};
use crate::{RotationError, Vec3};

/// 3x3 matrix (row-major)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat3 {
    /// Rows of the matrix
    pub m: [[f64; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Create a matrix from its three rows
    #[inline]
    pub const fn from_rows(r0: [f64; 3], r1: [f64; 3], r2: [f64; 3]) -> Self {
        Self { m: [r0, r1, r2] }
    }

    /// Create a matrix from a flat row-major array
    pub fn from_row_major(a: [f64; 9]) -> Self {
        Self { m: bytemuck::cast(a) }
    }

    /// Flat row-major dump
    pub fn to_row_major(&self) -> [f64; 9] {
        bytemuck::cast(self.m)
    }

    /// Flat column-major dump (OpenGL layout)
    pub fn to_cols_array(&self) -> [f64; 9] {
        self.transpose().to_row_major()
    }

    /// Flat column-major dump narrowed to f32 for GPU upload
    pub fn to_cols_array_f32(&self) -> [f32; 9] {
        self.to_cols_array().map(|v| v as f32)
    }

    /// Element at (row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    /// Set the element at (row, col)
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.m[row][col] = value;
    }

    /// Row as a vector
    #[inline]
    pub fn row(&self, row: usize) -> Vec3 {
        Vec3::from_array(self.m[row])
    }

    /// Column as a vector
    #[inline]
    pub fn col(&self, col: usize) -> Vec3 {
        Vec3::new(self.m[0][col], self.m[1][col], self.m[2][col])
    }

    /// Sum of the diagonal
    #[inline]
    pub fn trace(&self) -> f64 {
        self.m[0][0] + self.m[1][1] + self.m[2][2]
    }

    /// Transpose
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_rows(
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        )
    }

    /// Determinant (cofactor expansion along the first row)
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Adjugate (transpose of the cofactor matrix)
    pub fn adjugate(&self) -> Self {
        let m = &self.m;
        Self::from_rows(
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        )
    }

    /// Inverse, or `SingularMatrix` when the determinant is within EPSILON of zero
    ///
    /// For rotation matrices prefer [`Mat3::transpose`].
    pub fn try_inverse(&self) -> Result<Self, RotationError> {
        let det = self.determinant();
        if close_eq(det, 0.0, EPSILON) {
            return Err(RotationError::SingularMatrix { determinant: det });
        }
        Ok(self.adjugate() * (1.0 / det))
    }

    /// Component-wise comparison within `eps`
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.to_row_major()
            .iter()
            .zip(other.to_row_major().iter())
            .all(|(a, b)| close_eq(*a, *b, eps))
    }

    /// True when every element is within EPSILON of the identity
    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY, EPSILON)
    }

    /// True when the matrix is orthonormal with determinant 1
    pub fn is_rotation(&self) -> bool {
        close_eq(self.determinant(), 1.0, EPSILON) && (*self * self.transpose()).is_identity()
    }

    /// Rotation by `angle` radians in the plane spanned by axes `p1` and `p2`
    /// (0=X, 1=Y, 2=Z), turning `p1` towards `p2`.
    ///
    /// # Example
    /// ```
    /// use rot3d_math::{Mat3, Vec3};
    /// // YZ plane: rotation about X
    /// let m = Mat3::plane_rotation(std::f64::consts::FRAC_PI_2, 1, 2);
    /// assert!((m * Vec3::Y).approx_eq(Vec3::Z, 1e-12));
    /// ```
    pub fn plane_rotation(angle: f64, p1: usize, p2: usize) -> Self {
        let (sn, cs) = angle.sin_cos();

        let mut m = Self::IDENTITY;
        m.m[p1][p1] = cs;
        m.m[p2][p2] = cs;
        m.m[p2][p1] = sn;
        m.m[p1][p2] = -sn;
        m
    }

    /// Rotation about the X axis (pitch)
    pub fn rotation_x(angle: f64) -> Self {
        Self::plane_rotation(angle, 1, 2)
    }

    /// Rotation about the Y axis (yaw)
    pub fn rotation_y(angle: f64) -> Self {
        Self::plane_rotation(angle, 2, 0)
    }

    /// Rotation about the Z axis (roll)
    pub fn rotation_z(angle: f64) -> Self {
        Self::plane_rotation(angle, 0, 1)
    }

    /// Matrix-vector product `M * v`
    #[inline]
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

impl std::ops::Mul for Mat3 {
    type Output = Self;

    #[allow(clippy::needless_range_loop)]
    fn mul(self, other: Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    result.m[i][j] += self.m[i][k] * other.m[k][j];
                }
            }
        }
        result
    }
}

impl std::ops::MulAssign for Mat3 {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl std::ops::Mul<Vec3> for Mat3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.mul_vec3(v)
    }
}

impl std::ops::Mul<f64> for Mat3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self { m: self.m.map(|row| row.map(|v| v * scalar)) }
    }
}

impl std::ops::Add for Mat3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let mut result = self;
        result += other;
        result
    }
}

impl std::ops::AddAssign for Mat3 {
    fn add_assign(&mut self, other: Self) {
        for (row, other_row) in self.m.iter_mut().zip(other.m.iter()) {
            for (v, o) in row.iter_mut().zip(other_row.iter()) {
                *v += o;
            }
        }
    }
}

impl std::ops::Sub for Mat3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self + other * -1.0
    }
}
