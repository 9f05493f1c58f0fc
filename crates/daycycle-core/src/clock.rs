//! Accelerated simulation clock.
//!
//! The clock is the single source of truth for all temporal state in the
//! engine. It holds one absolute timestamp and moves it forward by real
//! elapsed seconds scaled by the configured time multiplier.
//!
//! # Design Principles
//!
//! - The timestamp is absolute (date + time of day), so midnight wraparound
//!   needs no special handling and time never moves backward.
//! - Time of day, hour, phase and day/night are derived from the timestamp
//!   on demand, never stored independently.
//! - Configured hours are resolved to [`DayBoundaries`] once at
//!   construction, and all boundary checks compare wall-clock times.
//! - All timestamp arithmetic is checked; a rejected advance leaves the
//!   clock untouched.

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::config::{ClockSettings, ConfigError, DayBoundaries};

/// Nanoseconds in one second, as a float for delta scaling.
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Seconds in one hour.
const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The clock settings failed validation.
    #[error("invalid clock configuration: {source}")]
    InvalidConfig {
        /// The underlying validation error.
        #[from]
        source: ConfigError,
    },

    /// The real-time delta was negative or not a finite number.
    #[error("invalid argument: delta must be a finite, non-negative number of seconds (got {delta})")]
    InvalidArgument {
        /// The rejected delta in real seconds.
        delta: f64,
    },

    /// Advancing would move the timestamp past the representable range.
    #[error("timestamp overflow: cannot advance beyond the representable date range")]
    TimestampOverflow,
}

/// Simulation clock advancing faster than real time.
#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    /// Validated configuration.
    settings: ClockSettings,

    /// Configured hours resolved to wall-clock times.
    boundaries: DayBoundaries,

    /// Current absolute simulated timestamp.
    now: NaiveDateTime,
}

impl Clock {
    /// Create a clock starting today (local date) at `morning_hour`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the settings are invalid.
    pub fn new(settings: ClockSettings) -> Result<Self, ClockError> {
        settings.validate()?;
        let boundaries = settings.boundaries();
        let start = Local::now().date_naive().and_time(boundaries.morning);
        Ok(Self {
            settings,
            boundaries,
            now: start,
        })
    }

    /// Create a clock starting at an explicit timestamp (useful for tests,
    /// replays and deterministic drivers).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the settings are invalid.
    pub fn starting_at(settings: ClockSettings, start: NaiveDateTime) -> Result<Self, ClockError> {
        settings.validate()?;
        Ok(Self {
            settings,
            boundaries: settings.boundaries(),
            now: start,
        })
    }

    /// Advance by `delta_real_seconds` of real time, scaled by the time
    /// multiplier. Returns the new timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidArgument`] if the delta is negative or
    /// not finite, or [`ClockError::TimestampOverflow`] if the result is not
    /// representable. The clock is unchanged on error.
    pub fn advance(&mut self, delta_real_seconds: f64) -> Result<NaiveDateTime, ClockError> {
        if !delta_real_seconds.is_finite() || delta_real_seconds < 0.0 {
            return Err(ClockError::InvalidArgument {
                delta: delta_real_seconds,
            });
        }

        let step = simulated_step(delta_real_seconds * self.settings.time_multiplier)?;
        self.now = self
            .now
            .checked_add_signed(step)
            .ok_or(ClockError::TimestampOverflow)?;
        Ok(self.now)
    }

    /// Return the current absolute timestamp.
    pub const fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Return the time of day in fractional hours, `[0, 24)`.
    pub fn time_of_day(&self) -> f64 {
        hours_from_time(self.now.time())
    }

    /// Return the integer hour of the current timestamp, `0..=23`.
    pub fn hour(&self) -> u32 {
        self.now.hour()
    }

    /// Return the settings this clock was built from.
    pub const fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    /// Return the configured hours resolved to wall-clock times.
    pub const fn boundaries(&self) -> &DayBoundaries {
        &self.boundaries
    }
}

/// Convert simulated seconds into a nanosecond-resolution step.
fn simulated_step(simulated_seconds: f64) -> Result<TimeDelta, ClockError> {
    let nanos = (simulated_seconds * NANOS_PER_SECOND).round();
    // i64::MAX is not exactly representable; anything at or above 2^63
    // would saturate in the cast below.
    #[allow(clippy::cast_precision_loss)]
    let limit = i64::MAX as f64;
    if !nanos.is_finite() || nanos >= limit {
        return Err(ClockError::TimestampOverflow);
    }
    #[allow(clippy::cast_possible_truncation)]
    let nanos = nanos as i64;
    Ok(TimeDelta::nanoseconds(nanos))
}

/// Fractional hours since midnight for a wall-clock time.
pub fn hours_from_time(time: NaiveTime) -> f64 {
    let seconds = f64::from(time.num_seconds_from_midnight())
        + f64::from(time.nanosecond()) / NANOS_PER_SECOND;
    seconds / SECONDS_PER_HOUR
}

/// Wall-clock time for fractional hours since midnight, wrapping at 24.
pub fn time_from_hours(hours: f64) -> NaiveTime {
    let nanos = (hours * SECONDS_PER_HOUR * NANOS_PER_SECOND).round();
    #[allow(clippy::cast_possible_truncation)]
    let offset = TimeDelta::nanoseconds(nanos as i64);
    NaiveTime::MIN.overflowing_add_signed(offset).0
}
