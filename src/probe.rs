//! Cross-representation conversion probe
//!
//! Each configured rotation is converted into every representation, every
//! probe vector is rotated by each of them, and the result is compared with
//! the matrix path. A healthy build agrees to within the configured tolerance
//! everywhere, including the 180° and gimbal-lock cases.

use rot3d_math::{AxisAngle, EulerAngles, Mat3, Mat4, Quat, Rotate3, RotationError, Vec3};

use crate::config::{ProbeConfig, ProbeRotation};

/// A single rotation expressed in every representation
#[derive(Debug, Clone, Copy)]
pub struct RotationForms {
    pub axis_angle: AxisAngle,
    pub mat3: Mat3,
    pub mat4: Mat4,
    pub quat: Quat,
    pub euler: EulerAngles,
}

impl RotationForms {
    /// Convert a configured rotation into every representation
    ///
    /// Axes and quaternions are normalized first; a zero axis or zero
    /// quaternion is an error.
    pub fn from_config(rotation: &ProbeRotation) -> Result<Self, RotationError> {
        match *rotation {
            ProbeRotation::AxisAngle { angle_deg, axis } => {
                let axis = Vec3::from_array(axis).try_normalized()?;
                let aa = AxisAngle::try_new(angle_deg.to_radians(), axis)?;
                let mat3 = aa.to_mat3();
                Ok(Self {
                    axis_angle: aa,
                    mat3,
                    mat4: aa.to_mat4(),
                    quat: aa.to_quat(),
                    euler: EulerAngles::from_mat3(&mat3),
                })
            }
            ProbeRotation::Euler { pitch_deg, yaw_deg, roll_deg } => {
                let euler = EulerAngles::from_degrees(pitch_deg, yaw_deg, roll_deg);
                let mat3 = euler.to_mat3();
                Ok(Self {
                    axis_angle: AxisAngle::from_mat3(&mat3),
                    mat3,
                    mat4: euler.to_mat4(),
                    quat: euler.to_quat(),
                    euler,
                })
            }
            ProbeRotation::Quaternion { w, x, y, z } => {
                let quat = Quat::new(w, x, y, z).try_normalized()?;
                Ok(Self {
                    axis_angle: AxisAngle::try_from_quat(quat)?,
                    mat3: quat.to_mat3(),
                    mat4: quat.to_mat4(),
                    quat,
                    euler: quat.to_euler(),
                })
            }
        }
    }

    /// Every form as a named rotation, matrix first
    pub fn named(&self) -> [(&'static str, &dyn Rotate3); 5] {
        [
            ("mat3", &self.mat3),
            ("mat4", &self.mat4),
            ("quat", &self.quat),
            ("axis_angle", &self.axis_angle),
            ("euler", &self.euler),
        ]
    }
}

/// Result of probing one configured rotation
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub rotation: ProbeRotation,
    pub forms: RotationForms,
    /// Largest deviation from the matrix result, per representation
    pub deviations: Vec<(&'static str, f64)>,
    /// Largest deviation over every representation and vector
    pub max_deviation: f64,
    pub agrees: bool,
}

/// Result of probing every configured rotation
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub tolerance: f64,
    pub outcomes: Vec<ProbeOutcome>,
}

impl ProbeReport {
    /// True when every representation of every rotation agreed
    pub fn all_agree(&self) -> bool {
        self.outcomes.iter().all(|o| o.agrees)
    }

    /// Outcomes that exceeded the tolerance
    pub fn disagreements(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|o| !o.agrees)
    }
}

/// Probe every configured rotation against every configured vector
pub fn evaluate(config: &ProbeConfig) -> Result<ProbeReport, RotationError> {
    let vectors: Vec<Vec3> = config.vectors.iter().copied().map(Vec3::from_array).collect();

    let mut outcomes = Vec::with_capacity(config.rotations.len());
    for rotation in &config.rotations {
        let forms = RotationForms::from_config(rotation).map_err(|e| {
            log::error!("Cannot convert {}: {}", rotation, e);
            e
        })?;
        outcomes.push(probe_rotation(rotation, forms, &vectors, config.tolerance));
    }

    Ok(ProbeReport {
        tolerance: config.tolerance,
        outcomes,
    })
}

fn probe_rotation(
    rotation: &ProbeRotation,
    forms: RotationForms,
    vectors: &[Vec3],
    tolerance: f64,
) -> ProbeOutcome {
    let reference: Vec<Vec3> = vectors.iter().map(|v| forms.mat3.rotate(*v)).collect();

    let mut deviations = Vec::new();
    let mut rotated = Vec3::ZERO;
    for (name, form) in forms.named().into_iter().skip(1) {
        let mut worst: f64 = 0.0;
        for (v, expected) in vectors.iter().zip(&reference) {
            form.rotate_into(*v, &mut rotated);
            let deviation = if rotated.to_array().iter().all(|c| c.is_finite()) {
                rotated.max_abs_diff(*expected)
            } else {
                f64::INFINITY
            };
            worst = worst.max(deviation);
        }
        log::debug!("{}: {} deviates by {:e}", rotation, name, worst);
        deviations.push((name, worst));
    }

    let max_deviation = deviations.iter().map(|(_, d)| *d).fold(0.0, f64::max);
    ProbeOutcome {
        rotation: rotation.clone(),
        forms,
        deviations,
        max_deviation,
        agrees: max_deviation <= tolerance,
    }
}
