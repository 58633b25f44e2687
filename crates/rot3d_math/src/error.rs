//! Rotation error types
//!
//! Checked conversions report degenerate input through [`RotationError`]
//! instead of letting NaN or infinity leak into the result.

use std::fmt;

/// Error type for checked rotation operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationError {
    /// A zero-length vector was normalized
    DegenerateVector,
    /// A zero quaternion was normalized or inverted
    DegenerateQuaternion,
    /// An axis passed as a rotation axis is not unit length
    NonUnitAxis { length: f64 },
    /// A quaternion used as a rotation is not unit length
    NonUnitQuaternion { norm: f64 },
    /// The matrix has no inverse
    SingularMatrix { determinant: f64 },
    /// The matrix is not orthonormal with determinant 1
    NotRotation,
    /// The sandwich product q·v·q⁻¹ left a non-zero scalar part
    NonPureResult { w: f64 },
}

impl fmt::Display for RotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationError::DegenerateVector => write!(f, "Cannot normalize a zero-length vector"),
            RotationError::DegenerateQuaternion => {
                write!(f, "Cannot normalize or invert a zero quaternion")
            }
            RotationError::NonUnitAxis { length } => {
                write!(f, "Rotation axis is not unit length (length {})", length)
            }
            RotationError::NonUnitQuaternion { norm } => {
                write!(f, "Quaternion is not unit length (norm {})", norm)
            }
            RotationError::SingularMatrix { determinant } => {
                write!(f, "Matrix is singular (determinant {})", determinant)
            }
            RotationError::NotRotation => write!(f, "Matrix is not a rotation matrix"),
            RotationError::NonPureResult { w } => {
                write!(f, "Rotated vector has non-zero scalar part {}", w)
            }
        }
    }
}

impl std::error::Error for RotationError {}
