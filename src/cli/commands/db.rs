use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::schema::{self, SchemaState, TABLE_NAME};
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Handle the `db` subcommand (`--check`, `--info`).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db { check, info } = cmd else {
        return Ok(());
    };

    if !Path::new(&cfg.database).exists() {
        messages::warning(format!(
            "Database {} does not exist: run `rpomodoro init` first",
            cfg.database
        ));
        return Ok(());
    }

    let conn = Connection::open(&cfg.database)?;

    if *check {
        run_check(&conn)?;
    }

    if *info {
        show_info(&conn, &cfg.database)?;
    }

    if !*check && !*info {
        messages::info("Nothing to do: use --check or --info");
    }

    Ok(())
}

/// `PRAGMA integrity_check` plus a schema-state probe.
fn run_check(conn: &Connection) -> AppResult<()> {
    let verdict: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    if verdict != "ok" {
        return Err(AppError::Schema(format!("integrity check failed: {}", verdict)));
    }
    messages::success("Integrity check: ok");

    match schema::check_schema(conn)? {
        SchemaState::Ok => messages::success(format!("Table '{}': schema ok", TABLE_NAME)),
        SchemaState::Absent => {
            messages::warning(format!("Table '{}' is absent (created on first use)", TABLE_NAME))
        }
        SchemaState::Mismatch => {
            return Err(AppError::Schema(format!(
                "table '{}' does not match the expected columns",
                TABLE_NAME
            )));
        }
    }
    Ok(())
}

/// Path, file size, schema state and row count.
fn show_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    let size = fs::metadata(db_path)?.len();
    println!("🗄️  Database : {}", db_path);
    println!("📦 Size     : {} bytes", size);

    match schema::check_schema(conn)? {
        SchemaState::Ok => {
            let rows: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", TABLE_NAME),
                [],
                |row| row.get(0),
            )?;
            println!("📋 Table    : {} ({} rows)", TABLE_NAME, rows);
        }
        SchemaState::Absent => println!("📋 Table    : {} (absent)", TABLE_NAME),
        SchemaState::Mismatch => println!("📋 Table    : {} (schema mismatch)", TABLE_NAME),
    }
    Ok(())
}
