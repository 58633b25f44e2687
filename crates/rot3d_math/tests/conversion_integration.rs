//! Integration tests for rotation conversions
//!
//! These tests move rotations through every representation and check that:
//! 1. Round trips reproduce the rotation (up to representation ambiguity)
//! 2. All forms rotate vectors identically
//! 3. The singular branches (0°, 180°, gimbal lock) stay finite and correct

use std::f64::consts::{FRAC_PI_2, PI};

use rot3d_math::{
    AxisAngle, EulerAngles, Mat3, Mat4, Quat, Rotate3, RotationError, Vec3, EPSILON,
};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
    a.approx_eq(b, EPSILON)
}

fn sample_axes() -> Vec<Vec3> {
    let mut axes = vec![Vec3::X, Vec3::Y, Vec3::Z, -Vec3::X, -Vec3::Y, -Vec3::Z];
    for raw in [
        [1.0, 1.0, 0.0],
        [1.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-3.0, 1.0, 2.0],
        [0.1, -0.2, 5.0],
    ] {
        axes.push(Vec3::from_array(raw).normalized());
    }
    axes
}

const SAMPLE_ANGLES: [f64; 7] = [0.0, 0.01, 0.5, FRAC_PI_2, 2.0, 3.1, PI];

const PROBES: [Vec3; 4] = [
    Vec3::X,
    Vec3::Y,
    Vec3::new(1.0, 2.0, 3.0),
    Vec3::new(-0.5, 4.0, -2.5),
];

// ==================== Concrete Cases ====================

#[test]
fn test_x_rotated_about_y_quarter_turn() {
    let aa = AxisAngle::new(FRAC_PI_2, Vec3::Y);
    let expected = Vec3::new(0.0, 0.0, -1.0);

    assert!(vec_approx_eq(aa.rotate(Vec3::X), expected));
    assert!(vec_approx_eq(aa.to_mat3().rotate(Vec3::X), expected));
    assert!(vec_approx_eq(aa.to_mat4().rotate(Vec3::X), expected));
    assert!(vec_approx_eq(aa.to_quat().rotate(Vec3::X), expected));
}

#[test]
fn test_euler_pitch_quarter_turn() {
    let m = Mat3::from_euler(FRAC_PI_2, 0.0, 0.0);
    assert!(vec_approx_eq(m.rotate(Vec3::Y), Vec3::Z));
}

#[test]
fn test_euler_yaw_quarter_turn_gimbal_lock() {
    let m = Mat3::from_euler(0.0, FRAC_PI_2, 0.0);
    assert!(vec_approx_eq(m.rotate(Vec3::X), -Vec3::Z));

    let e = m.to_euler();
    assert_eq!(e.roll, 0.0, "roll pinned to zero in gimbal lock");
    assert_eq!(e.yaw, FRAC_PI_2, "yaw exactly 90°");
}

#[test]
fn test_identity_is_zero_about_x() {
    assert_eq!(Mat3::IDENTITY.to_axis_angle(), AxisAngle::new(0.0, Vec3::X));
    assert_eq!(Quat::IDENTITY.to_axis_angle(), AxisAngle::new(0.0, Vec3::X));
}

// ==================== Round Trips ====================

#[test]
fn test_axis_angle_matrix_roundtrip() {
    for axis in sample_axes() {
        for angle in SAMPLE_ANGLES {
            let m = Mat3::from_axis_angle(angle, axis);
            let back = m.to_axis_angle();

            if angle == 0.0 {
                assert_eq!(back, AxisAngle::IDENTITY);
            } else if angle == PI {
                assert!(approx_eq(back.angle, PI));
                assert!(vec_approx_eq(back.axis, axis) || vec_approx_eq(back.axis, -axis));
            } else {
                assert!(approx_eq(back.angle, angle), "angle {} got {}", angle, back.angle);
                assert!(vec_approx_eq(back.axis, axis), "axis {:?} got {:?}", axis, back.axis);
            }
        }
    }
}

#[test]
fn test_axis_angle_quat_roundtrip() {
    for axis in sample_axes() {
        for angle in SAMPLE_ANGLES {
            let back = Quat::from_axis_angle(angle, axis).to_axis_angle();
            if angle == 0.0 {
                assert_eq!(back, AxisAngle::IDENTITY);
                continue;
            }
            assert!(approx_eq(back.angle, angle), "angle {} got {}", angle, back.angle);
            assert!(vec_approx_eq(back.axis, axis));
        }
    }
}

#[test]
fn test_matrix_quat_roundtrip() {
    for axis in sample_axes() {
        for angle in SAMPLE_ANGLES {
            let m = Mat3::from_axis_angle(angle, axis);
            let back = Quat::from_mat3(&m).to_mat3();
            assert!(back.approx_eq(&m, EPSILON), "angle {} axis {:?}", angle, axis);

            let q = Quat::from_axis_angle(angle, axis);
            assert!(Quat::from_mat3(&q.to_mat3()).same_rotation(q, EPSILON));
        }
    }
}

#[test]
fn test_euler_roundtrip_is_idempotent() {
    let angles = [-3.0, -FRAC_PI_2, -0.7, 0.0, 0.4, FRAC_PI_2, 2.5];
    for pitch in angles {
        for yaw in angles {
            for roll in angles {
                let m = Mat3::from_euler(pitch, yaw, roll);
                let e = m.to_euler();
                let again = Mat3::from_euler(e.pitch, e.yaw, e.roll);
                for v in PROBES {
                    assert!(
                        vec_approx_eq(m.rotate(v), again.rotate(v)),
                        "angles {:?}",
                        [pitch, yaw, roll]
                    );
                }
            }
        }
    }
}

#[test]
fn test_euler_roundtrip_near_gimbal_lock() {
    for d in [1e-8, 1e-6, 1e-5, 4e-5, 1e-3] {
        for yaw in [FRAC_PI_2 - d, -FRAC_PI_2 + d] {
            for (pitch, roll) in [(0.3, 0.2), (-2.0, 1.1), (0.0, -0.7)] {
                let m = Mat3::from_euler(pitch, yaw, roll);
                let again = m.to_euler().to_mat3();
                for v in PROBES {
                    assert!(
                        vec_approx_eq(m.rotate(v), again.rotate(v)),
                        "angles {:?}",
                        [pitch, yaw, roll]
                    );
                }
            }
        }
    }
}

#[test]
fn test_mat4_roundtrips_through_rotation_block() {
    let m = Mat4::from_euler(0.2, -0.9, 1.7);
    assert!(Quat::from_mat4(&m).to_mat4().approx_eq(&m, EPSILON));
    let aa = m.to_axis_angle();
    assert!(Mat4::from_axis_angle(aa.angle, aa.axis).approx_eq(&m, EPSILON));
}

// ==================== Agreement ====================

#[test]
fn test_every_form_rotates_identically() {
    for axis in sample_axes() {
        for angle in SAMPLE_ANGLES {
            let aa = AxisAngle::new(angle, axis);
            let m = aa.to_mat3();
            let forms: [&dyn Rotate3; 5] = [
                &aa,
                &m,
                &aa.to_mat4(),
                &aa.to_quat(),
                &EulerAngles::from_mat3(&m),
            ];
            for v in PROBES {
                let expected = m.rotate(v);
                for form in forms {
                    assert!(vec_approx_eq(form.rotate(v), expected), "angle {} axis {:?}", angle, axis);
                }
            }
        }
    }
}

#[test]
fn test_euler_quat_and_matrix_agree() {
    let e = EulerAngles::new(0.9, -0.3, 2.2);
    let q = Quat::from_euler(e.pitch, e.yaw, e.roll);
    for v in PROBES {
        assert!(vec_approx_eq(q.rotate(v), e.rotate(v)));
    }
    assert!(q.to_euler().to_mat3().approx_eq(&e.to_mat3(), EPSILON));
}

// ==================== Singular Branches ====================

#[test]
fn test_half_turn_quaternion_regression() {
    // trace + 1 is ~1e-16 here; dividing by it would blow up
    for axis in sample_axes() {
        let m = Mat3::from_axis_angle(PI, axis);
        let q = Quat::from_mat3(&m);
        assert!(q.is_unit(), "axis {:?} gave {:?}", axis, q);
        assert!(q.w.abs() < EPSILON);
        assert!(vec_approx_eq(q.vector(), axis) || vec_approx_eq(q.vector(), -axis));
    }
}

#[test]
fn test_near_half_turn_stays_finite() {
    let axis = Vec3::new(1.0, 2.0, 2.0).normalized();
    for angle in [PI - 1e-6, PI - 1e-10, PI + 1e-10] {
        let m = Mat3::from_axis_angle(angle, axis);
        let aa = m.to_axis_angle();
        assert!(aa.angle.is_finite() && aa.axis.length().is_finite());
        assert!(AxisAngle::new(aa.angle, aa.axis).to_mat3().approx_eq(&m, 1e-6));
        assert!(Quat::from_mat3(&m).is_unit());
    }
}

#[test]
fn test_small_angles_survive_matrix_extraction() {
    for axis in sample_axes() {
        for angle in [1e-5, 1e-7, 1e-8] {
            let m = Mat3::from_axis_angle(angle, axis);
            let back = m.to_axis_angle();
            assert!(approx_eq(back.angle, angle), "angle {} got {}", angle, back.angle);
            assert!(back.to_mat3().approx_eq(&m, EPSILON));
        }
    }
}

#[test]
fn test_tiny_angles_report_rotation_or_identity() {
    let aa = Mat3::from_axis_angle(1e-12, Vec3::Z).to_axis_angle();
    assert_eq!(aa, AxisAngle::IDENTITY);

    let aa = Quat::from_axis_angle(1e-6, Vec3::Z).to_axis_angle();
    assert!(approx_eq(aa.angle, 1e-6));
    assert!(vec_approx_eq(aa.axis, Vec3::Z));
}

// ==================== Checked Boundaries ====================

#[test]
fn test_checked_constructors() {
    assert!(matches!(
        AxisAngle::try_new(0.5, Vec3::new(1.0, 1.0, 1.0)),
        Err(RotationError::NonUnitAxis { .. })
    ));
    assert_eq!(
        Quat::try_from_mat3(&(Mat3::IDENTITY * 3.0)),
        Err(RotationError::NotRotation)
    );
    assert_eq!(Quat::ZERO.try_rotate(Vec3::X), Err(RotationError::DegenerateQuaternion));
    assert_eq!(Vec3::ZERO.try_normalized(), Err(RotationError::DegenerateVector));
}

#[test]
fn test_try_rotate_with_scaled_quaternion() {
    // the true inverse cancels the scale
    let q = Quat::from_axis_angle(FRAC_PI_2, Vec3::Y) * 3.0;
    let v = q.try_rotate(Vec3::X).unwrap();
    assert!(vec_approx_eq(v, -Vec3::Z));
}
