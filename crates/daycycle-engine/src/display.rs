//! On-screen clock text.

use chrono::NaiveDateTime;

/// Format a timestamp as 12-hour `hh:mm` clock text.
pub fn clock_text(time: NaiveDateTime) -> String {
    time.format("%I:%M").to_string()
}
