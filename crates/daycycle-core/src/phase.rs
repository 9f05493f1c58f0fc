//! Classification of a time of day into one of the four day phases.
//!
//! The four configured boundary hours split the day into windows:
//!
//! | Phase     | Window (half-open)            |
//! |-----------|-------------------------------|
//! | Morning   | `[morning, afternoon)`        |
//! | Afternoon | `[afternoon, evening)`        |
//! | Evening   | `[evening, night)`            |
//! | Night     | `[night, 24)` and `[0, morning)` |
//!
//! Night is the fallthrough, so the classifier is total. Because the
//! boundaries are validated as strictly increasing within `[0, 24)`, the
//! Night window is the only one that spans midnight.
//!
//! Under [`BoundaryRule::Exclusive`] each named window excludes both of its
//! ends, so a time exactly on a boundary hour is classified as Night.
//!
//! Times and boundaries are compared as [`NaiveTime`] values at nanosecond
//! resolution.

use chrono::NaiveTime;
use daycycle_types::Phase;

use crate::config::{BoundaryRule, DayBoundaries};

/// Classify a wall-clock time of day into a [`Phase`].
pub fn classify(time: NaiveTime, boundaries: &DayBoundaries) -> Phase {
    let windows = [
        (Phase::Morning, boundaries.morning, boundaries.afternoon),
        (Phase::Afternoon, boundaries.afternoon, boundaries.evening),
        (Phase::Evening, boundaries.evening, boundaries.night),
    ];

    windows
        .into_iter()
        .find(|&(_, start, end)| in_window(time, start, end, boundaries.phase_rule))
        .map_or(Phase::Night, |(phase, _, _)| phase)
}

fn in_window(time: NaiveTime, start: NaiveTime, end: NaiveTime, rule: BoundaryRule) -> bool {
    match rule {
        BoundaryRule::HalfOpen => time >= start && time < end,
        BoundaryRule::Exclusive => time > start && time < end,
    }
}
