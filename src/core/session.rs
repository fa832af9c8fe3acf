//! Interactive session loop: alternating focus and rest intervals until
//! the user stops.

use crate::config::Config;
use crate::core::timer::{CancelToken, IntervalTimer};
use crate::db::session_log::SessionLog;
use crate::errors::{AppError, AppResult};
use crate::notify::Notifier;
use crate::ui::messages;
use std::io::{self, BufRead, Write};

enum Rest {
    Short,
    Long,
}

/// Drives the indefinite focus/rest loop. Owns the timer, the session
/// log and the interrupt token; an interrupt during a countdown cancels
/// that interval, an interrupt at a prompt ends the session.
pub struct Session {
    cfg: Config,
    log: SessionLog,
    notifier: Notifier,
    timer: IntervalTimer,
    interrupt: CancelToken,
}

impl Session {
    pub fn new(cfg: Config) -> AppResult<Self> {
        let log = SessionLog::open(&cfg.database)?;
        let notifier = Notifier::new(cfg.popup);

        Ok(Self {
            cfg,
            log,
            notifier,
            timer: IntervalTimer::new(),
            interrupt: CancelToken::new(),
        })
    }

    /// Run the session loop until interrupted or end-of-input.
    pub fn run(&mut self) -> AppResult<()> {
        let token = self.interrupt.clone();
        ctrlc::set_handler(move || token.cancel())
            .map_err(|e| AppError::Signal(e.to_string()))?;

        loop {
            let Some(task) = self.prompt_task()? else { break };
            let Some(period) = self.prompt_period()? else { break };

            self.run_interval(&task, u64::from(period))?;

            let Some(rest) = self.prompt_rest()? else { break };
            match rest {
                Rest::Short => {
                    self.run_interval("short rest", u64::from(self.cfg.short_rest_min))?
                }
                Rest::Long => {
                    self.run_interval("long rest", u64::from(self.cfg.long_rest_min))?
                }
            }
        }

        self.log.close()?;
        messages::info("Session ended");
        Ok(())
    }

    /// Run one interval and append its record to the log. The interrupt
    /// token is cleared on both sides: a Ctrl-C during the countdown is
    /// consumed as cancellation of that interval only.
    fn run_interval(&mut self, task: &str, minutes: u64) -> AppResult<()> {
        self.interrupt.clear();

        let record = self
            .timer
            .run(task, minutes, &self.interrupt, &self.notifier)?;
        self.log.append(&record)?;

        self.interrupt.clear();
        Ok(())
    }

    /// Print a prompt and read one trimmed line.
    /// Returns None on end-of-input or a pending interrupt.
    fn prompt_line(&self, prompt: &str) -> AppResult<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;

        if n == 0 || self.interrupt.is_cancelled() {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_task(&self) -> AppResult<Option<String>> {
        self.prompt_line("task: ")
    }

    /// Period in minutes. Blank input falls back to the configured
    /// default; non-numeric input re-prompts locally and never reaches
    /// the timer.
    fn prompt_period(&self) -> AppResult<Option<u32>> {
        let default = self.cfg.default_period_min;
        loop {
            let prompt = format!("period [min] (default: {}min.): ", default);
            match self.prompt_line(&prompt)? {
                None => return Ok(None),
                Some(s) if s.is_empty() => return Ok(Some(default)),
                Some(s) => match s.parse::<u32>() {
                    Ok(minutes) => return Ok(Some(minutes)),
                    Err(e) => messages::error(format!("invalid period '{}': {}", s, e)),
                },
            }
        }
    }

    /// Short/long rest choice; anything other than `l` means short.
    fn prompt_rest(&self) -> AppResult<Option<Rest>> {
        match self.prompt_line("take break [s/l]: ")? {
            None => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("l") => Ok(Some(Rest::Long)),
            Some(_) => Ok(Some(Rest::Short)),
        }
    }
}
