//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables,
//! and that the shipped default configuration probes cleanly.

use rot3d::config::{AppConfig, ConfigError, ProbeRotation};
use rot3d::probe;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("ROT3D_DEBUG__LOG_LEVEL", "trace");
    std::env::set_var("ROT3D_PROBE__TOLERANCE", "1e-6");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("ROT3D_DEBUG__LOG_LEVEL");
    std::env::remove_var("ROT3D_PROBE__TOLERANCE");

    assert_eq!(config.debug.log_level, "trace");
    assert_eq!(config.probe.tolerance, 1e-6);
}

#[test]
#[serial]
fn test_invalid_env_tolerance_is_rejected() {
    std::env::set_var("ROT3D_PROBE__TOLERANCE", "-1.0");
    let result = AppConfig::load();
    std::env::remove_var("ROT3D_PROBE__TOLERANCE");

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("ROT3D_PROBE__TOLERANCE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    assert!(!config.probe.vectors.is_empty());
    assert!(config.probe.rotations.contains(&ProbeRotation::Euler {
        pitch_deg: 0.0,
        yaw_deg: 90.0,
        roll_deg: 0.0,
    }));
}

#[test]
#[serial]
fn test_missing_directory_falls_back_to_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.debug.log_level, "info");
    assert_eq!(config.probe.tolerance, 1e-9);
}

#[test]
#[serial]
fn test_default_file_probes_cleanly() {
    std::env::remove_var("ROT3D_PROBE__TOLERANCE");

    let config = AppConfig::load().unwrap();
    let report = probe::evaluate(&config.probe).unwrap();
    assert_eq!(report.outcomes.len(), config.probe.rotations.len());
    assert!(report.all_agree());
}
