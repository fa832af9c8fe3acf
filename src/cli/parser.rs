use clap::{Parser, Subcommand};

/// Command-line interface definition for rpomodoro
/// CLI application to run Pomodoro intervals and log them with SQLite
#[derive(Parser)]
#[command(
    name = "rpomodoro",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple Pomodoro timer CLI: run focus/rest intervals and log them to SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// With no subcommand, `start` is assumed.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Run an interactive Pomodoro session (focus/rest loop)
    Start,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the session database
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}
