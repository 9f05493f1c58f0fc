//! Notification listeners standing in for the presentation layer.
//!
//! Lighting, skybox and clock UI would subscribe to the service the same
//! way; here every notification becomes a structured log line.

use daycycle_core::service::{DayCycleService, Subscription};
use tracing::info;

/// Subscribe log listeners for all four notifications.
///
/// Returns the handles in the order sunrise, sunset, hour, phase.
pub fn attach_log_listeners(service: &mut DayCycleService) -> Vec<Subscription> {
    vec![
        service.on_sunrise(|| info!(target: "daycycle::events", "Sunrise")),
        service.on_sunset(|| info!(target: "daycycle::events", "Sunset")),
        service.on_hour_change(|hour| info!(target: "daycycle::events", hour, "Hour changed")),
        service.on_phase_change(|phase| {
            info!(target: "daycycle::events", phase = %phase, "Time of day changed");
        }),
    ]
}
