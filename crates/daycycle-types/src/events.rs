//! Notification records emitted by the day cycle.
//!
//! Subscribers receive notifications through callbacks registered on the
//! service. Each tick additionally reports the notifications it fired as
//! [`DayCycleEvent`] values so that consumers which prefer polling (or
//! which forward events over a wire) see the same edges in the same order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Phase;

/// An edge-triggered transition of the day cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DayCycleEvent {
    /// Day time began (`is_day_time` flipped to `true`).
    Sunrise,
    /// Day time ended (`is_day_time` flipped to `false`).
    Sunset,
    /// The integer hour of the clock changed.
    HourChanged {
        /// The new hour, `0..=23`.
        hour: u32,
    },
    /// The phase of the day changed.
    PhaseChanged {
        /// The phase that was entered.
        phase: Phase,
    },
}

impl DayCycleEvent {
    /// Build the day/night event matching the new `is_day_time` value.
    pub const fn from_day_time(is_day_time: bool) -> Self {
        if is_day_time { Self::Sunrise } else { Self::Sunset }
    }
}
