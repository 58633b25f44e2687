//! 4x4 matrix type
//!
//! A homogeneous matrix whose upper-left 3x3 block holds a rotation. Storage is
//! row-major like [`Mat3`]; [`Mat4::to_cols_array`] provides the column-major
//! layout OpenGL-style shaders expect.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::approx::{close_eq, EPSILON};
use crate::{Mat3, Vec3};

/// 4x4 matrix (row-major)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    /// Rows of the matrix
    pub m: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    /// Create a matrix from its four rows
    #[inline]
    pub const fn from_rows(r0: [f64; 4], r1: [f64; 4], r2: [f64; 4], r3: [f64; 4]) -> Self {
        Self { m: [r0, r1, r2, r3] }
    }

    /// Create a matrix from a flat row-major array
    pub fn from_row_major(a: [f64; 16]) -> Self {
        Self { m: bytemuck::cast(a) }
    }

    /// Flat row-major dump
    pub fn to_row_major(&self) -> [f64; 16] {
        bytemuck::cast(self.m)
    }

    /// Flat column-major dump (OpenGL layout)
    pub fn to_cols_array(&self) -> [f64; 16] {
        self.transpose().to_row_major()
    }

    /// Flat column-major dump narrowed to f32 for GPU upload
    pub fn to_cols_array_f32(&self) -> [f32; 16] {
        self.to_cols_array().map(|v| v as f32)
    }

    /// Embed a 3x3 block with an identity last row and column
    pub fn from_mat3(r: &Mat3) -> Self {
        let mut result = Self::IDENTITY;
        for (row, src) in result.m.iter_mut().zip(r.m.iter()) {
            row[..3].copy_from_slice(src);
        }
        result
    }

    /// Upper-left 3x3 block
    pub fn to_mat3(&self) -> Mat3 {
        let m = &self.m;
        Mat3::from_rows(
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        )
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

    /// Row as an array
    #[inline]
    pub fn row(&self, row: usize) -> [f64; 4] {
        self.m[row]
    }

    /// Column as an array
    #[inline]
    pub fn col(&self, col: usize) -> [f64; 4] {
        [self.m[0][col], self.m[1][col], self.m[2][col], self.m[3][col]]
    }

    /// Transpose
    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;
        for (i, row) in self.m.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                result.m[j][i] = *v;
            }
        }
        result
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

    /// True when the 3x3 block is a rotation and the rest is identity
    pub fn is_rotation(&self) -> bool {
        let m = &self.m;
        let border = [m[0][3], m[1][3], m[2][3], m[3][0], m[3][1], m[3][2]];
        border.iter().all(|v| close_eq(*v, 0.0, EPSILON))
            && close_eq(m[3][3], 1.0, EPSILON)
            && self.to_mat3().is_rotation()
    }

    /// Rotation about the X axis (pitch)
    pub fn rotation_x(angle: f64) -> Self {
        Self::from_mat3(&Mat3::rotation_x(angle))
    }

    /// Rotation about the Y axis (yaw)
    pub fn rotation_y(angle: f64) -> Self {
        Self::from_mat3(&Mat3::rotation_y(angle))
    }

    /// Rotation about the Z axis (roll)
    pub fn rotation_z(angle: f64) -> Self {
        Self::from_mat3(&Mat3::rotation_z(angle))
    }

    /// Apply the upper-left 3x3 block to `v`
    ///
    /// The translation column is ignored; this is the rotation-only product.
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

impl std::ops::Mul for Mat4 {
    type Output = Self;

    #[allow(clippy::needless_range_loop)]
    fn mul(self, other: Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result.m[i][j] += self.m[i][k] * other.m[k][j];
                }
            }
        }
        result
    }
}

impl std::ops::MulAssign for Mat4 {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl std::ops::Mul<Vec3> for Mat4 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.mul_vec3(v)
    }
}
