//! Platform popup backends.

use crate::errors::{AppError, AppResult};
use std::process::Command;

/// Available desktop popup transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Linux notify-send
    NotifySend,
    /// KDE kdialog
    Kdialog,
    /// macOS terminal-notifier
    TerminalNotifier,
    /// macOS osascript
    Osascript,
    /// Windows / WSL PowerShell toast
    PowerShell,
    /// Fallback: plain console line
    Stdout,
}

impl Backend {
    /// Detect the best available transport for the current platform.
    pub fn detect() -> Self {
        #[cfg(target_os = "macos")]
        {
            if Self::command_exists("terminal-notifier") {
                return Self::TerminalNotifier;
            }
            return Self::Osascript;
        }

        #[cfg(target_os = "linux")]
        {
            if std::env::var("WSL_DISTRO_NAME").is_ok() {
                return Self::PowerShell;
            }
            if Self::command_exists("notify-send") {
                return Self::NotifySend;
            }
            if Self::command_exists("kdialog") {
                return Self::Kdialog;
            }
            return Self::Stdout;
        }

        #[cfg(target_os = "windows")]
        {
            return Self::PowerShell;
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            Self::Stdout
        }
    }

    fn command_exists(cmd: &str) -> bool {
        Command::new("which")
            .arg(cmd)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotifySend => "notify-send",
            Self::Kdialog => "kdialog",
            Self::TerminalNotifier => "terminal-notifier",
            Self::Osascript => "osascript",
            Self::PowerShell => "powershell",
            Self::Stdout => "stdout",
        }
    }

    /// Deliver one popup through this transport.
    pub fn send(&self, title: &str, message: &str, source_label: &str) -> AppResult<()> {
        match self {
            Self::NotifySend => self.send_notify_send(title, message, source_label),
            Self::Kdialog => self.send_kdialog(title, message),
            Self::TerminalNotifier => self.send_terminal_notifier(title, message, source_label),
            Self::Osascript => self.send_osascript(title, message),
            Self::PowerShell => self.send_powershell(title, message, source_label),
            Self::Stdout => self.send_stdout(title, message),
        }
    }

    fn check(&self, status: std::process::ExitStatus) -> AppResult<()> {
        if status.success() {
            Ok(())
        } else {
            Err(AppError::Notify(format!(
                "{} exited with status {}",
                self.name(),
                status
            )))
        }
    }

    fn send_notify_send(&self, title: &str, message: &str, source_label: &str) -> AppResult<()> {
        let status = Command::new("notify-send")
            .args(["--app-name", source_label, title, message])
            .status()?;
        self.check(status)
    }

    fn send_kdialog(&self, title: &str, message: &str) -> AppResult<()> {
        let status = Command::new("kdialog")
            .args(["--passivepopup", message, "5", "--title", title])
            .status()?;
        self.check(status)
    }

    fn send_terminal_notifier(
        &self,
        title: &str,
        message: &str,
        source_label: &str,
    ) -> AppResult<()> {
        let status = Command::new("terminal-notifier")
            .args([
                "-title", title, "-message", message, "-group", source_label,
            ])
            .status()?;
        self.check(status)
    }

    fn send_osascript(&self, title: &str, message: &str) -> AppResult<()> {
        let title = title.replace('"', r#"\""#);
        let message = message.replace('"', r#"\""#);
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            message, title
        );

        let status = Command::new("osascript").args(["-e", &script]).status()?;
        self.check(status)
    }

    fn send_powershell(&self, title: &str, message: &str, source_label: &str) -> AppResult<()> {
        // PowerShell single-quote escaping doubles the quote.
        let title = title.replace('\'', "''");
        let message = message.replace('\'', "''");

        let script = format!(
            r#"[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null; $template = [Windows.UI.Notifications.ToastNotificationManager]::GetTemplateContent([Windows.UI.Notifications.ToastTemplateType]::ToastText02); $template.GetElementsByTagName('text')[0].AppendChild($template.CreateTextNode('{}')) | Out-Null; $template.GetElementsByTagName('text')[1].AppendChild($template.CreateTextNode('{}')) | Out-Null; [Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier('{}').Show([Windows.UI.Notifications.ToastNotification]::new($template))"#,
            title, message, source_label
        );

        let status = Command::new("powershell.exe")
            .args(["-Command", &script])
            .status()?;
        self.check(status)
    }

    fn send_stdout(&self, title: &str, message: &str) -> AppResult<()> {
        println!("[{}] {}", title, message);
        Ok(())
    }
}
