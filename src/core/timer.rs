//! Interval countdown engine.
//!
//! A countdown runs on a dedicated worker thread that samples elapsed
//! wall-clock time once per polling interval, publishes whole elapsed
//! minutes to a shared state, and watches a cancellation token. The
//! controlling thread polls at the same cadence and joins the worker
//! before reading any result.

use crate::errors::{AppError, AppResult};
use crate::models::interval::IntervalRecord;
use crate::notify::Notifier;
use crate::utils::time::{format_hms, whole_minutes};
use chrono::Local;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::thread;
use std::time::Duration;

/// Fixed granularity at which the countdown re-evaluates elapsed time
/// and cancellation state.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Countdown lifecycle. `Done` is terminal; `run()` returns exactly once
/// per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Finishing,
    Done,
}

/// External, cooperative request to stop the current interval early.
///
/// Cloneable handle around a single flag; a second `cancel()` while the
/// countdown unwinds is a no-op.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Elapsed-minutes value shared between the countdown worker and the
/// controlling thread. Owned by the timer instance, never process-wide.
#[derive(Debug, Default)]
struct CountdownState {
    elapsed_min: AtomicI64,
}

impl CountdownState {
    fn publish_elapsed(&self, minutes: i64) {
        self.elapsed_min.store(minutes, Ordering::SeqCst);
    }

    fn elapsed_minutes(&self) -> i64 {
        self.elapsed_min.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.elapsed_min.store(0, Ordering::SeqCst);
    }
}

/// Runs a single countdown for a named task and returns the completed
/// interval record. Cancellation is an alternate termination trigger of
/// the same state machine, not an error path.
pub struct IntervalTimer {
    poll_interval: Duration,
    state: TimerState,
    shared: Arc<CountdownState>,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::with_poll_interval(POLL_INTERVAL)
    }

    /// A timer polling at a custom interval. The 1-second default is the
    /// observable contract; shorter intervals keep the test suite fast.
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            state: TimerState::Idle,
            shared: Arc::new(CountdownState::default()),
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Run the countdown to completion or cancellation.
    ///
    /// Emits a non-blocking textual start notification, then a completion
    /// notification (text + best-effort popup) once the worker has fully
    /// stopped. `elapsed_minutes` is read only after the worker is joined.
    pub fn run(
        &mut self,
        task_name: &str,
        duration_min: u64,
        cancel: &CancelToken,
        notifier: &Notifier,
    ) -> AppResult<IntervalRecord> {
        self.shared.reset();

        let start_time = Local::now();
        notifier.notify_text(&format!("\"{}\" start {}", task_name, start_time));

        self.state = TimerState::Running;

        let shared = Arc::clone(&self.shared);
        let token = cancel.clone();
        let poll = self.poll_interval;
        let target = duration_min as i64;
        let worker = thread::spawn(move || {
            loop {
                let elapsed = Local::now().signed_duration_since(start_time);
                let minutes = whole_minutes(&elapsed);
                shared.publish_elapsed(minutes);

                // Progress line, overwritten in place each tick.
                print!("\r{} / {:02}", format_hms(&elapsed), target);
                let _ = io::stdout().flush();

                if minutes >= target || token.is_cancelled() {
                    break;
                }
                thread::sleep(poll);
            }
            println!();
        });

        // Poll rather than block on join; the worker itself observes the
        // cancellation token within one polling interval.
        while !worker.is_finished() {
            thread::sleep(self.poll_interval);
        }

        self.state = TimerState::Finishing;
        worker
            .join()
            .map_err(|_| AppError::Other("countdown worker panicked".to_string()))?;

        let finish_time = Local::now();
        let elapsed_minutes = self.shared.elapsed_minutes();

        let message = format!(
            "\"{}\" finish {} elapsed: {}",
            task_name, finish_time, elapsed_minutes
        );
        notifier.notify_text(&message);
        notifier.notify_popup("Finish period", &message);

        self.state = TimerState::Done;

        Ok(IntervalRecord {
            task_name: task_name.to_string(),
            start_time,
            finish_time,
            elapsed_minutes,
        })
    }
}
