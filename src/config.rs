//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ROT3D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::fmt;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
    /// Conversion probe configuration
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ROT3D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional, never committed
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // ROT3D_PROBE__TOLERANCE=1e-6 -> probe.tolerance = 1e-6
        figment = figment.merge(Env::prefixed("ROT3D_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the probe meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tolerance = self.probe.tolerance;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "probe.tolerance must be a positive number, got {}",
                tolerance
            )));
        }
        Ok(())
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Default log filter (error, warn, info, debug, trace); `RUST_LOG` wins
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Conversion probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Largest per-component deviation from the matrix result that still agrees
    pub tolerance: f64,
    /// Vectors every rotation is applied to, as `[x, y, z]`
    pub vectors: Vec<[f64; 3]>,
    /// Rotations to push through every representation
    pub rotations: Vec<ProbeRotation>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            vectors: vec![
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 2.0, 3.0],
            ],
            rotations: vec![
                ProbeRotation::AxisAngle { angle_deg: 90.0, axis: [0.0, 1.0, 0.0] },
                ProbeRotation::AxisAngle { angle_deg: 180.0, axis: [1.0, 1.0, 0.0] },
                ProbeRotation::Euler { pitch_deg: 90.0, yaw_deg: 0.0, roll_deg: 0.0 },
                ProbeRotation::Euler { pitch_deg: 0.0, yaw_deg: 90.0, roll_deg: 0.0 },
                ProbeRotation::Quaternion { w: 0.0, x: 0.0, y: 0.0, z: 1.0 },
            ],
        }
    }
}

/// A rotation as written in configuration, angles in degrees
///
/// ```toml
/// [[probe.rotations]]
/// kind = "axis_angle"
/// angle_deg = 90.0
/// axis = [0.0, 1.0, 0.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeRotation {
    /// Angle about an axis; the axis is normalized on use
    AxisAngle { angle_deg: f64, axis: [f64; 3] },
    /// Pitch, then yaw, then roll
    Euler { pitch_deg: f64, yaw_deg: f64, roll_deg: f64 },
    /// Quaternion components; normalized on use
    Quaternion { w: f64, x: f64, y: f64, z: f64 },
}

impl fmt::Display for ProbeRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeRotation::AxisAngle { angle_deg, axis } => {
                write!(f, "axis-angle {}° about {:?}", angle_deg, axis)
            }
            ProbeRotation::Euler { pitch_deg, yaw_deg, roll_deg } => {
                write!(f, "euler pitch {}° yaw {}° roll {}°", pitch_deg, yaw_deg, roll_deg)
            }
            ProbeRotation::Quaternion { w, x, y, z } => {
                write!(f, "quaternion ({}, {}, {}, {})", w, x, y, z)
            }
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or did not match the schema
    Figment(Box<figment::Error>),
    /// Values parsed but are out of range
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Figment(Box::new(e))
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Figment(e) => write!(f, "Configuration error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Figment(e) => Some(e.as_ref()),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.debug.log_level, "info");
        assert_eq!(config.probe.tolerance, 1e-9);
        assert_eq!(config.probe.vectors.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("log_level"));
        assert!(toml.contains("tolerance"));
        assert!(toml.contains("kind = \"axis_angle\""));
    }

    #[test]
    fn test_probe_rotation_from_toml() {
        let src = r#"
            [[rotations]]
            kind = "euler"
            pitch_deg = 10.0
            yaw_deg = 20.0
            roll_deg = 30.0

            [[rotations]]
            kind = "quaternion"
            w = 1.0
            x = 0.0
            y = 0.0
            z = 0.0
        "#;

        #[derive(Deserialize)]
        struct Wrapper {
            rotations: Vec<ProbeRotation>,
        }

        let parsed: Wrapper = toml::from_str(src).unwrap();
        assert_eq!(
            parsed.rotations,
            vec![
                ProbeRotation::Euler { pitch_deg: 10.0, yaw_deg: 20.0, roll_deg: 30.0 },
                ProbeRotation::Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 },
            ]
        );
    }

    #[test]
    fn test_invalid_tolerance() {
        let mut config = AppConfig::default();
        config.probe.tolerance = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("probe.tolerance"));
    }

    #[test]
    fn test_probe_rotation_display() {
        let rotation = ProbeRotation::Euler { pitch_deg: 90.0, yaw_deg: 0.0, roll_deg: 0.0 };
        assert_eq!(rotation.to_string(), "euler pitch 90° yaw 0° roll 0°");
    }
}
