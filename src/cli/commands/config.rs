use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use std::fs;

const REQUIRED_FIELDS: [&str; 5] = [
    "database",
    "default_period_min",
    "short_rest_min",
    "long_rest_min",
    "popup",
];

/// Handle the `config` subcommand (`--print`, `--check`).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        print_current(cfg)?;
    }

    if *check {
        check_fields()?;
    }

    if !*print_config && !*check {
        messages::info("Nothing to do: use --print or --check");
    }

    Ok(())
}

/// Print the config file as stored, or the effective defaults when no
/// file exists yet.
fn print_current(cfg: &Config) -> AppResult<()> {
    let path = Config::config_file();

    if path.exists() {
        println!("📄 {}\n", path.display());
        println!("{}", fs::read_to_string(&path)?);
    } else {
        messages::info("No config file found; showing effective defaults");
        let yaml = serde_yaml::to_string(cfg).map_err(|_| AppError::ConfigSave)?;
        println!("{}", yaml);
    }
    Ok(())
}

/// Report fields missing from the config file (they fall back to
/// defaults at load time).
fn check_fields() -> AppResult<()> {
    let path = Config::config_file();

    if !path.exists() {
        messages::warning("No config file found: run `rpomodoro init` to create one");
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)?;

    let mut missing = Vec::new();
    for field in REQUIRED_FIELDS {
        if doc.get(field).is_none() {
            missing.push(field);
        }
    }

    if missing.is_empty() {
        messages::success("Configuration file is complete");
        Ok(())
    } else {
        for field in &missing {
            messages::warning(format!("missing field: {}", field));
        }
        Err(AppError::Config(format!(
            "{} missing field(s) in {}",
            missing.len(),
            path.display()
        )))
    }
}
