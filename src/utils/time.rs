//! Time utilities: countdown progress formatting and whole-minute math.

use chrono::Duration;

/// Format a duration as zero-padded `HH:MM:SS`. Negative durations clamp
/// to zero.
pub fn format_hms(d: &Duration) -> String {
    let total = d.num_seconds().max(0);
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Whole minutes of a duration, floored. Negative durations clamp to zero.
pub fn whole_minutes(d: &Duration) -> i64 {
    d.num_seconds().max(0) / 60
}
