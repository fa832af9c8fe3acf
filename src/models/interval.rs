use chrono::{DateTime, Local};
use serde::Serialize;

/// One completed work-or-rest interval, immutable once produced.
///
/// `elapsed_minutes` is sampled when the countdown loop exits, so a
/// cancelled interval carries the minutes actually spent, not the
/// requested duration.
#[derive(Debug, Clone, Serialize)]
pub struct IntervalRecord {
    pub task_name: String,  // ⇔ pomodoro_log.task (TEXT)
    pub start_time: DateTime<Local>, // ⇔ pomodoro_log.start (TEXT, RFC 3339)
    pub finish_time: DateTime<Local>, // ⇔ pomodoro_log.finish (TEXT, RFC 3339)
    pub elapsed_minutes: i64, // ⇔ pomodoro_log.duration_min (INTEGER)
}

impl IntervalRecord {
    pub fn start_str(&self) -> String {
        self.start_time.to_rfc3339()
    }

    pub fn finish_str(&self) -> String {
        self.finish_time.to_rfc3339()
    }
}
