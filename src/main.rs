//! rot3d - rotation conversion probe
//!
//! Loads the probe configuration, pushes every configured rotation through
//! every representation and exits non-zero if any of them disagree.

use std::process::ExitCode;

use rot3d::config::AppConfig;
use rot3d::probe;

fn main() -> ExitCode {
    // Config first: it supplies the default log filter
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // RUST_LOG overrides debug.log_level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting rot3d probe");

    let report = match probe::evaluate(&config.probe) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Probe aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for outcome in &report.outcomes {
        if outcome.agrees {
            log::info!("{}: all forms agree (max deviation {:e})", outcome.rotation, outcome.max_deviation);
        } else {
            log::warn!(
                "{}: forms disagree beyond {:e}: {:?}",
                outcome.rotation,
                report.tolerance,
                outcome.deviations
            );
        }
    }

    if report.all_agree() {
        log::info!("{} rotations checked", report.outcomes.len());
        ExitCode::SUCCESS
    } else {
        log::warn!("{} of {} rotations disagree", report.disagreements().count(), report.outcomes.len());
        ExitCode::FAILURE
    }
}
