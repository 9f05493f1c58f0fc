//! Day cycle engine binary.
//!
//! Drives the day/night cycle in real time and logs what a presentation
//! layer would show: sunrise and sunset, hour and phase changes, and a
//! periodic clock line with the sun angle.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `daycycle-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Apply environment overrides, warning about rejected values
//! 4. Create the day cycle service from the clock settings
//! 5. Attach notification listeners
//! 6. Run the tick loop until `max_ticks` or Ctrl-C
//! 7. Log the result

mod display;
mod error;
mod listeners;
mod runner;

use std::path::Path;

use daycycle_core::config::DayCycleConfig;
use daycycle_core::service::DayCycleService;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const CONFIG_PATH: &str = "daycycle-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a tick fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (mut config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("daycycle-engine starting");
    if from_file {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Apply environment overrides.
    config.clock.apply_env_overrides();
    info!(
        time_multiplier = config.clock.time_multiplier,
        sunrise_hour = config.clock.sunrise_hour,
        sunset_hour = config.clock.sunset_hour,
        tick_interval_ms = config.engine.tick_interval_ms,
        max_ticks = config.engine.max_ticks,
        "Clock settings"
    );

    // 4. Create the service.
    let mut service = DayCycleService::new(config.clock).map_err(EngineError::from)?;
    info!(
        start = %service.current_time(),
        phase = %service.current_phase(),
        is_day_time = service.is_day_time(),
        "Day cycle service initialized"
    );

    // 5. Attach listeners.
    let subscriptions = listeners::attach_log_listeners(&mut service);
    info!(listeners = subscriptions.len(), "Notification listeners attached");

    // 6. Run the tick loop.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C, running until max_ticks");
            std::future::pending::<()>().await;
        }
    };
    let summary = runner::run_cycle(&mut service, &config.engine, shutdown)
        .await
        .map_err(EngineError::from)?;

    // 7. Log results.
    runner::log_run_end(&summary);
    for subscription in subscriptions {
        service.unsubscribe(subscription);
    }
    info!("daycycle-engine shutdown complete");

    Ok(())
}

/// Load configuration from `daycycle-config.yaml`.
///
/// Returns the configuration and whether it came from the file.
/// Environment overrides are applied by the caller after logging starts.
fn load_config() -> Result<(DayCycleConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = DayCycleConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((DayCycleConfig::default(), false))
    }
}
