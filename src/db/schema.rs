//! Fixed schema of the append-only session log table.

use crate::errors::AppResult;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

pub const TABLE_NAME: &str = "pomodoro_log";

/// Column set and order are part of the contract: one row per completed
/// interval, never updated, never deleted.
pub const COLUMNS: [&str; 4] = ["task", "start", "finish", "duration_min"];

/// Outcome of probing an existing store against the fixed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// Table exists with exactly the expected columns in order.
    Ok,
    /// Table does not exist yet.
    Absent,
    /// Table exists but its column set or order disagrees.
    Mismatch,
}

/// Check if the log table exists.
fn table_exists(conn: &Connection) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([TABLE_NAME], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Column names of the log table, in declaration order.
fn table_columns(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", TABLE_NAME))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

/// Probe the store and classify its schema state.
pub fn check_schema(conn: &Connection) -> AppResult<SchemaState> {
    if !table_exists(conn)? {
        return Ok(SchemaState::Absent);
    }

    let cols = table_columns(conn)?;
    let matches = cols.len() == COLUMNS.len()
        && cols.iter().zip(COLUMNS.iter()).all(|(have, want)| have == want);

    if matches {
        Ok(SchemaState::Ok)
    } else {
        Ok(SchemaState::Mismatch)
    }
}

/// Create the log table with the fixed schema.
pub fn create_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            task         TEXT NOT NULL,
            start        TEXT NOT NULL,
            finish       TEXT NOT NULL,
            duration_min INTEGER NOT NULL
        );
        "#,
        TABLE_NAME
    ))?;
    Ok(())
}

/// Rename a mismatched log table out of the way, preserving its rows.
/// Returns the name of the set-aside table.
pub fn set_aside_mismatched(conn: &Connection) -> AppResult<String> {
    let backup = format!("{}_old_{}", TABLE_NAME, Utc::now().timestamp());
    conn.execute(
        &format!("ALTER TABLE {} RENAME TO {}", TABLE_NAME, backup),
        [],
    )?;
    Ok(backup)
}
