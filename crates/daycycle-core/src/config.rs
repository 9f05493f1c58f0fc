//! Configuration loading and typed config structures for the Daycycle engine.
//!
//! The canonical configuration lives in `daycycle-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, a loader that reads the file, and the validation that every
//! [`ClockSettings`] must pass before a clock can be built from it.

use std::path::Path;

use chrono::NaiveTime;
use serde::Deserialize;
use tracing::warn;

use crate::clock::time_from_hours;

/// Number of hours in one simulated day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Environment variable overriding [`ClockSettings::time_multiplier`].
pub const TIME_MULTIPLIER_ENV: &str = "DAYCYCLE_TIME_MULTIPLIER";

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The settings violate a range or ordering rule.
    #[error("invalid clock settings: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the settings.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `daycycle-config.yaml`. All fields have
/// defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DayCycleConfig {
    /// Clock speed, sun and phase boundaries.
    #[serde(default)]
    pub clock: ClockSettings,

    /// Driving loop settings for the engine binary.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DayCycleConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment overrides are not applied here. Call
    /// [`ClockSettings::apply_env_overrides`] once logging is installed so
    /// that a rejected override is reported.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Environment overrides are not applied; the result reflects the
    /// string alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// How phase windows treat a time exactly equal to a boundary hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Each window is `[start, end)`: every time of day belongs to exactly
    /// one named window.
    #[default]
    HalfOpen,
    /// Each window is `(start, end)`: a time exactly on a boundary matches
    /// no window and falls through to Night.
    Exclusive,
}

/// Clock speed, sunrise/sunset and phase boundaries.
///
/// Supplied once and never mutated. All hours are fractional hours of the
/// day in `[0, 24)`. Call [`ClockSettings::validate`] (done by the clock
/// constructor) before relying on the ordering invariants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ClockSettings {
    /// Simulated seconds advanced per real second.
    #[serde(default = "default_time_multiplier")]
    pub time_multiplier: f64,

    /// Start of the day arc.
    #[serde(default = "default_sunrise_hour")]
    pub sunrise_hour: f64,

    /// End of the day arc. Must be later than `sunrise_hour`.
    #[serde(default = "default_sunset_hour")]
    pub sunset_hour: f64,

    /// Start of [`Phase::Morning`](daycycle_types::Phase::Morning) and the
    /// hour the clock starts at.
    #[serde(default = "default_morning_hour")]
    pub morning_hour: f64,

    /// Start of [`Phase::Afternoon`](daycycle_types::Phase::Afternoon).
    #[serde(default = "default_afternoon_hour")]
    pub afternoon_hour: f64,

    /// Start of [`Phase::Evening`](daycycle_types::Phase::Evening).
    #[serde(default = "default_evening_hour")]
    pub evening_hour: f64,

    /// Start of [`Phase::Night`](daycycle_types::Phase::Night).
    #[serde(default = "default_night_hour")]
    pub night_hour: f64,

    /// Treatment of times exactly on a phase boundary.
    #[serde(default)]
    pub phase_boundaries: BoundaryRule,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            time_multiplier: default_time_multiplier(),
            sunrise_hour: default_sunrise_hour(),
            sunset_hour: default_sunset_hour(),
            morning_hour: default_morning_hour(),
            afternoon_hour: default_afternoon_hour(),
            evening_hour: default_evening_hour(),
            night_hour: default_night_hour(),
            phase_boundaries: BoundaryRule::default(),
        }
    }
}

impl ClockSettings {
    /// Check range, ordering and distinctness invariants.
    ///
    /// - `time_multiplier` is finite and strictly positive.
    /// - Every hour is finite and in `[0, 24)`.
    /// - `sunrise_hour < sunset_hour`.
    /// - `morning_hour < afternoon_hour < evening_hour < night_hour`.
    /// - No two of the six hours resolve to the same time of day.
    ///
    /// Ordering and distinctness are checked on the resolved
    /// [`DayBoundaries`], so hours closer than a nanosecond collide.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_multiplier.is_finite() || self.time_multiplier <= 0.0 {
            return Err(invalid(format!(
                "time_multiplier must be finite and greater than 0 (got {})",
                self.time_multiplier
            )));
        }

        for (name, hour) in self.named_hours() {
            if !hour.is_finite() || !(0.0..HOURS_PER_DAY).contains(&hour) {
                return Err(invalid(format!("{name} must be in [0, 24) (got {hour})")));
            }
        }

        let times = self.boundaries();
        if times.sunset <= times.sunrise {
            return Err(invalid(format!(
                "sunset_hour ({}) must be later than sunrise_hour ({})",
                self.sunset_hour, self.sunrise_hour
            )));
        }

        let phase_starts = [
            ("morning_hour", self.morning_hour, times.morning),
            ("afternoon_hour", self.afternoon_hour, times.afternoon),
            ("evening_hour", self.evening_hour, times.evening),
            ("night_hour", self.night_hour, times.night),
        ];
        for pair in phase_starts.windows(2) {
            if let [(earlier_name, earlier, earlier_time), (later_name, later, later_time)] = pair {
                if later_time <= earlier_time {
                    return Err(invalid(format!(
                        "{later_name} ({later}) must be later than {earlier_name} ({earlier})"
                    )));
                }
            }
        }

        let mut seen: Vec<(&str, f64, NaiveTime)> = Vec::with_capacity(6);
        for (name, hour) in self.named_hours() {
            let time = time_from_hours(hour);
            if let Some((other_name, other_hour, _)) =
                seen.iter().find(|(_, _, other_time)| *other_time == time)
            {
                return Err(invalid(format!(
                    "{other_name} ({other_hour}) and {name} ({hour}) must be distinct"
                )));
            }
            seen.push((name, hour, time));
        }

        Ok(())
    }

    /// Replace `time_multiplier` from `DAYCYCLE_TIME_MULTIPLIER` when set.
    ///
    /// Values that do not parse as a number are ignored with a warning;
    /// range checks happen later in [`ClockSettings::validate`].
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(TIME_MULTIPLIER_ENV) {
            self.override_time_multiplier(&val);
        }
    }

    /// Replace `time_multiplier` with a raw override value.
    ///
    /// Returns `false` and logs a warning if the value is not a number.
    pub fn override_time_multiplier(&mut self, raw: &str) -> bool {
        match raw.trim().parse::<f64>() {
            Ok(multiplier) => {
                self.time_multiplier = multiplier;
                true
            }
            Err(e) => {
                warn!(
                    variable = TIME_MULTIPLIER_ENV,
                    value = raw,
                    error = %e,
                    "ignoring unparseable time multiplier override"
                );
                false
            }
        }
    }

    /// Resolve the six configured hours to wall-clock times.
    pub fn boundaries(&self) -> DayBoundaries {
        DayBoundaries {
            sunrise: time_from_hours(self.sunrise_hour),
            sunset: time_from_hours(self.sunset_hour),
            morning: time_from_hours(self.morning_hour),
            afternoon: time_from_hours(self.afternoon_hour),
            evening: time_from_hours(self.evening_hour),
            night: time_from_hours(self.night_hour),
            phase_rule: self.phase_boundaries,
        }
    }

    /// All six configured hours with their field names.
    const fn named_hours(&self) -> [(&'static str, f64); 6] {
        [
            ("sunrise_hour", self.sunrise_hour),
            ("sunset_hour", self.sunset_hour),
            ("morning_hour", self.morning_hour),
            ("afternoon_hour", self.afternoon_hour),
            ("evening_hour", self.evening_hour),
            ("night_hour", self.night_hour),
        ]
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

/// Configured hours resolved to nanosecond wall-clock times.
///
/// Day/night and phase checks compare the clock's time of day against
/// these values, never against the float hours, so a clock started at
/// `morning_hour` sits exactly on the Morning boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundaries {
    /// Start of the day arc.
    pub sunrise: NaiveTime,
    /// End of the day arc.
    pub sunset: NaiveTime,
    /// Start of Morning.
    pub morning: NaiveTime,
    /// Start of Afternoon.
    pub afternoon: NaiveTime,
    /// Start of Evening.
    pub evening: NaiveTime,
    /// Start of Night.
    pub night: NaiveTime,
    /// Treatment of times exactly on a phase boundary.
    pub phase_rule: BoundaryRule,
}

/// Driving loop settings for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Number of ticks before the engine stops (0 = until interrupted).
    #[serde(default)]
    pub max_ticks: u64,

    /// Log a clock report every N ticks (0 = never).
    #[serde(default = "default_report_interval_ticks")]
    pub report_interval_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
            report_interval_ticks: default_report_interval_ticks(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_time_multiplier() -> f64 {
    1000.0
}

const fn default_sunrise_hour() -> f64 {
    5.0
}

const fn default_sunset_hour() -> f64 {
    17.0
}

const fn default_morning_hour() -> f64 {
    6.0
}

const fn default_afternoon_hour() -> f64 {
    10.0
}

const fn default_evening_hour() -> f64 {
    14.0
}

const fn default_night_hour() -> f64 {
    18.0
}

const fn default_tick_interval_ms() -> u64 {
    50
}

const fn default_report_interval_ticks() -> u64 {
    20
}

fn default_log_level() -> String {
    "info".to_owned()
}
