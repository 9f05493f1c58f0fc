//! Enumeration types for the Daycycle engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Phases of the day
// ---------------------------------------------------------------------------

/// One of the four named segments of a simulated day.
///
/// Phases form an ordered cycle: Morning, Afternoon, Evening, Night, and
/// back to Morning. The boundaries between them are configured in hours
/// and the current phase is always derived from the clock, never stored
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Phase {
    /// From `morning_hour` up to `afternoon_hour`.
    Morning,
    /// From `afternoon_hour` up to `evening_hour`.
    Afternoon,
    /// From `evening_hour` up to `night_hour`.
    Evening,
    /// Everything else, wrapping past midnight back to `morning_hour`.
    Night,
}

impl Phase {
    /// All phases in cycle order, starting with [`Phase::Morning`].
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    /// The phase that follows this one in the daily cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Morning => Self::Afternoon,
            Self::Afternoon => Self::Evening,
            Self::Evening => Self::Night,
            Self::Night => Self::Morning,
        }
    }

    /// Human-readable name of the phase.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
