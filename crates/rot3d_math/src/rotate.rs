//! Applying rotations to vectors
//!
//! Every rotation representation can rotate a [`Vec3`]. Matrices multiply,
//! quaternions use the sandwich product, axis-angle uses Rodrigues' vector
//! form and Euler angles go through their matrix.

use crate::approx::{close_eq, EPSILON};
use crate::{AxisAngle, EulerAngles, Mat3, Mat4, Quat, Vec3};

/// A rotation that can be applied to 3D vectors
///
/// Implementors assume a valid rotation: unit axis, unit quaternion,
/// orthonormal matrix. Use the `try_*` constructors to validate input first.
pub trait Rotate3: Send + Sync {
    /// Rotate `v`, returning a new vector
    fn rotate(&self, v: Vec3) -> Vec3;

    /// Rotate `v` into a caller-provided output
    #[inline]
    fn rotate_into(&self, v: Vec3, out: &mut Vec3) {
        *out = self.rotate(v);
    }
}

impl Rotate3 for Mat3 {
    #[inline]
    fn rotate(&self, v: Vec3) -> Vec3 {
        self.mul_vec3(v)
    }
}

impl Rotate3 for Mat4 {
    /// The translation column is ignored
    #[inline]
    fn rotate(&self, v: Vec3) -> Vec3 {
        self.mul_vec3(v)
    }
}

impl Rotate3 for Quat {
    /// `q · (0, v) · q*`; the conjugate is the inverse of a unit quaternion
    fn rotate(&self, v: Vec3) -> Vec3 {
        let r = *self * Quat::from_vector(v) * self.conjugate();
        debug_assert!(
            close_eq(r.w, 0.0, EPSILON * v.length().max(1.0)),
            "quaternion rotation left scalar part {}",
            r.w
        );
        r.vector()
    }
}

impl Rotate3 for AxisAngle {
    /// `v cos θ + (k × v) sin θ + k (k · v)(1 - cos θ)`
    fn rotate(&self, v: Vec3) -> Vec3 {
        let k = self.axis;
        let (s, c) = self.angle.sin_cos();
        v * c + k.cross(v) * s + k * (k.dot(v) * (1.0 - c))
    }
}

impl Rotate3 for EulerAngles {
    fn rotate(&self, v: Vec3) -> Vec3 {
        self.to_mat3().mul_vec3(v)
    }
}
