//! rpomodoro library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod notify;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    // With no subcommand, drop straight into an interactive session.
    match &cli.command {
        None | Some(Commands::Start) => cli::commands::start::handle(cfg),
        Some(Commands::Init) => cli::commands::init::handle(cli),
        Some(command @ Commands::Config { .. }) => cli::commands::config::handle(command, cfg),
        Some(command @ Commands::Db { .. }) => cli::commands::db::handle(command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load the config once; the CLI may override the database path.
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
