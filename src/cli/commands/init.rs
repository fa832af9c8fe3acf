use crate::config::Config;
use crate::db::session_log::SessionLog;
use crate::errors::AppResult;
use crate::ui::messages;

use crate::cli::parser::Cli;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite session log (schema included)
pub fn handle(cli: &Cli) -> AppResult<()> {
    // In test mode the config file is left alone; the database path
    // still honors the --db override.
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing rpomodoro…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", cfg.database);

    let mut log = SessionLog::open(&cfg.database)?;
    log.close()?;

    messages::success(format!("Database initialized at {}", cfg.database));
    println!("🎉 rpomodoro initialization completed!");
    Ok(())
}
