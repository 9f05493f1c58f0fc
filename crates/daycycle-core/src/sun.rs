//! Sun rotation angle over the day and night arcs.
//!
//! The sun sweeps two arcs per simulated day:
//!
//! - the **day arc** from sunrise to sunset, mapped onto `[0, 180]` degrees;
//! - the **night arc** from sunset back to sunrise (wrapping past
//!   midnight), mapped onto `[180, 360]` degrees.
//!
//! Within an arc the angle is a linear interpolation over the elapsed
//! fraction of the arc, so the sweep is continuous. Both functions here are
//! pure and may be called at any time without touching clock state.
//!
//! The day/night test compares wall-clock times against the resolved
//! [`DayBoundaries`]; only the interpolation works in fractional hours.

use chrono::NaiveTime;

use crate::clock::hours_from_time;
use crate::config::{DayBoundaries, HOURS_PER_DAY};

/// Degrees covered by one arc.
const ARC_DEGREES: f64 = 180.0;

/// Degrees in a full rotation.
const FULL_TURN_DEGREES: f64 = 360.0;

/// Whether a time of day is strictly between sunrise and sunset.
pub fn is_day_time(time: NaiveTime, boundaries: &DayBoundaries) -> bool {
    time > boundaries.sunrise && time < boundaries.sunset
}

/// Hours from `from` forward to `to`, wrapping across midnight.
///
/// Always in `[0, 24)`.
pub fn wrap_diff(from: f64, to: f64) -> f64 {
    let difference = to - from;
    if difference < 0.0 {
        difference + HOURS_PER_DAY
    } else {
        difference
    }
}

/// Sun rotation in degrees, `[0, 360)`, for a time of day.
pub fn sun_angle(time: NaiveTime, boundaries: &DayBoundaries) -> f64 {
    let is_day = is_day_time(time, boundaries);

    let (arc_start, arc_end, start_degree) = if is_day {
        (boundaries.sunrise, boundaries.sunset, 0.0)
    } else {
        (boundaries.sunset, boundaries.sunrise, ARC_DEGREES)
    };

    let arc_start = hours_from_time(arc_start);
    let total = wrap_diff(arc_start, hours_from_time(arc_end));
    let elapsed = wrap_diff(arc_start, hours_from_time(time));
    // total > 0 because validated settings have sunrise < sunset.
    let fraction = (elapsed / total).clamp(0.0, 1.0);

    let angle = lerp(start_degree, start_degree + ARC_DEGREES, fraction);
    angle.rem_euclid(FULL_TURN_DEGREES)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    (to - from).mul_add(t, from)
}
