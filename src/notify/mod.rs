//! Notification boundary: a textual channel that never fails the caller
//! and a best-effort desktop popup channel.

pub mod backend;

pub use backend::Backend;

use crate::ui::messages;

/// Source label shown by desktop popups.
pub const APP_NAME: &str = "rpomodoro";

pub struct Notifier {
    backend: Backend,
    popup_enabled: bool,
}

impl Notifier {
    /// Notifier with a platform-detected popup backend.
    pub fn new(popup_enabled: bool) -> Self {
        Self {
            backend: Backend::detect(),
            popup_enabled,
        }
    }

    /// Notifier that only ever writes to stdout. Used where popup
    /// delivery is unwanted (tests, headless runs).
    pub fn text_only() -> Self {
        Self {
            backend: Backend::Stdout,
            popup_enabled: false,
        }
    }

    /// Write a message to the console. Never blocks, never fails.
    pub fn notify_text(&self, message: &str) {
        println!("{}", message);
    }

    /// Deliver a desktop popup. Failure is swallowed here: a missing or
    /// broken backend must not reach the timer state machine.
    pub fn notify_popup(&self, title: &str, message: &str) {
        if !self.popup_enabled {
            return;
        }
        if let Err(e) = self.backend.send(title, message, APP_NAME) {
            messages::warning(format!("popup delivery failed: {}", e));
        }
    }
}
