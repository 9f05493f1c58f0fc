//! Real-time driving loop for the day cycle.
//!
//! [`run_cycle`] plays the role of a frame loop: it wakes on a fixed
//! interval, measures the real time elapsed since the previous wake, and
//! passes it to [`DayCycleService::tick`]. It supports:
//!
//! - **Bounded runs**: stop after `max_ticks` (0 = unlimited)
//! - **Clean shutdown**: stop when the supplied shutdown future resolves
//! - **Periodic reports**: clock text, phase and sun angle every
//!   `report_interval_ticks`

use std::future::Future;
use std::time::Duration;

use daycycle_core::clock::ClockError;
use daycycle_core::config::EngineConfig;
use daycycle_core::service::DayCycleService;
use daycycle_types::DayCycleSnapshot;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::display;

/// Why the tick loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured `max_ticks` were executed.
    MaxTicksReached,
    /// The shutdown future resolved (e.g. Ctrl-C).
    Shutdown,
}

/// Result of a driving loop run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Why the loop stopped.
    pub end_reason: EndReason,
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// Total notifications fired across all ticks.
    pub events_fired: u64,
    /// Service state when the loop stopped.
    pub final_snapshot: DayCycleSnapshot,
}

/// Drive `service` in real time until `max_ticks` or `shutdown`.
///
/// # Errors
///
/// Returns [`ClockError`] if a tick fails; the loop stops at that tick.
pub async fn run_cycle<S>(
    service: &mut DayCycleService,
    engine: &EngineConfig,
    shutdown: S,
) -> Result<RunSummary, ClockError>
where
    S: Future<Output = ()>,
{
    let period = Duration::from_millis(engine.tick_interval_ms.max(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!(
        tick_interval_ms = engine.tick_interval_ms,
        max_ticks = engine.max_ticks,
        start = %service.current_time(),
        phase = %service.current_phase(),
        "Day cycle starting"
    );

    let mut last = Instant::now();
    let mut total_ticks: u64 = 0;
    let mut events_fired: u64 = 0;

    let end_reason = loop {
        if engine.max_ticks > 0 && total_ticks >= engine.max_ticks {
            break EndReason::MaxTicksReached;
        }

        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!("Shutdown requested");
                break EndReason::Shutdown;
            }
            _ = interval.tick() => {}
        }

        let now = Instant::now();
        let delta = now.duration_since(last).as_secs_f64();
        last = now;

        let report = service.tick(delta)?;
        total_ticks = total_ticks.saturating_add(1);
        let fired = u64::try_from(report.events.len()).unwrap_or(u64::MAX);
        events_fired = events_fired.saturating_add(fired);

        if report.tick.checked_rem(engine.report_interval_ticks) == Some(0) {
            log_report(&service.snapshot());
        }
    };

    Ok(RunSummary {
        end_reason,
        total_ticks,
        events_fired,
        final_snapshot: service.snapshot(),
    })
}

/// Log the clock display line for a snapshot.
pub fn log_report(snapshot: &DayCycleSnapshot) {
    info!(
        tick = snapshot.ticks,
        clock = %display::clock_text(snapshot.current_time),
        phase = %snapshot.current_phase,
        is_day_time = snapshot.is_day_time,
        sun_angle = format!("{:.1}", snapshot.sun_angle),
        "Clock report"
    );
}

/// Log the outcome of a run.
pub fn log_run_end(summary: &RunSummary) {
    info!(
        reason = ?summary.end_reason,
        total_ticks = summary.total_ticks,
        events_fired = summary.events_fired,
        "Day cycle ended"
    );

    if summary.total_ticks == 0 {
        warn!("Day cycle ended with no ticks executed");
    } else {
        log_report(&summary.final_snapshot);
    }
}
