//! Append-only store of completed intervals.

use crate::db::schema::{self, SchemaState, TABLE_NAME};
use crate::errors::{AppError, AppResult};
use crate::models::interval::IntervalRecord;
use crate::ui::messages;
use rusqlite::{Connection, params};
use std::path::Path;

/// Durable session log over a single SQLite connection.
///
/// The connection is owned exclusively by the control flow driving the
/// interval loop; no concurrent writers, no transaction spans more than
/// one append.
pub struct SessionLog {
    conn: Option<Connection>,
}

impl SessionLog {
    /// Open (or create) the store and ensure the fixed schema exists.
    ///
    /// A pre-existing table whose columns disagree with the fixed schema
    /// is renamed aside with its rows intact, and a fresh table is
    /// created in its place.
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let conn = Connection::open(path)?;

        match schema::check_schema(&conn)? {
            SchemaState::Ok => {}
            SchemaState::Absent => schema::create_log_table(&conn)?,
            SchemaState::Mismatch => {
                let backup = schema::set_aside_mismatched(&conn)?;
                messages::warning(format!(
                    "existing '{}' table does not match the expected columns; old rows kept in '{}'",
                    TABLE_NAME, backup
                ));
                schema::create_log_table(&conn)?;
            }
        }

        Ok(Self { conn: Some(conn) })
    }

    /// Append one row for a completed interval. One INSERT, one commit.
    pub fn append(&self, record: &IntervalRecord) -> AppResult<()> {
        let conn = self.conn.as_ref().ok_or(AppError::LogClosed)?;

        conn.execute(
            &format!(
                "INSERT INTO {} (task, start, finish, duration_min) VALUES (?1, ?2, ?3, ?4)",
                TABLE_NAME
            ),
            params![
                record.task_name,
                record.start_str(),
                record.finish_str(),
                record.elapsed_minutes,
            ],
        )?;

        Ok(())
    }

    /// Release the store connection. Safe to call more than once.
    pub fn close(&mut self) -> AppResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| AppError::Db(e))?;
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

impl Drop for SessionLog {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = conn.close();
        }
    }
}
