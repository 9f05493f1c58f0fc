//! Point-in-time view of the day cycle for presentation consumers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Phase;

/// Everything the query API exposes, captured at a single instant.
///
/// Presentation code (light intensity, skybox blending, clock text) reads
/// this instead of querying the service field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DayCycleSnapshot {
    /// Number of ticks applied since the service was created.
    pub ticks: u64,
    /// Absolute simulated timestamp.
    pub current_time: NaiveDateTime,
    /// Integer hour of `current_time`, `0..=23`.
    pub current_hour: u32,
    /// Whether the sun is strictly between sunrise and sunset.
    pub is_day_time: bool,
    /// Current phase of the day.
    pub current_phase: Phase,
    /// Rotation of the sun in degrees, `[0, 360)`.
    pub sun_angle: f64,
}
