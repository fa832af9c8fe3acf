use chrono::{Duration, Local};
use rpomodoro::db::schema::{self, COLUMNS, SchemaState, TABLE_NAME};
use rpomodoro::db::session_log::SessionLog;
use rpomodoro::errors::AppError;
use rpomodoro::models::interval::IntervalRecord;
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Unique DB path in the system temp dir, removed up front.
fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpomodoro.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

fn sample_record(task: &str, minutes: i64) -> IntervalRecord {
    let finish = Local::now();
    IntervalRecord {
        task_name: task.to_string(),
        start_time: finish - Duration::minutes(minutes),
        finish_time: finish,
        elapsed_minutes: minutes,
    }
}

fn column_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info('{}')", TABLE_NAME))
        .expect("pragma");
    stmt.query_map([], |row| row.get::<_, String>(1))
        .expect("query")
        .map(|r| r.expect("column"))
        .collect()
}

#[test]
fn bootstrap_creates_fixed_schema_with_zero_rows() {
    let db_path = setup_test_db("bootstrap");

    let mut log = SessionLog::open(&db_path).expect("open");
    log.close().expect("close");

    let conn = Connection::open(&db_path).expect("reopen");
    assert_eq!(column_names(&conn), COLUMNS.to_vec());

    let rows: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", TABLE_NAME), [], |row| {
            row.get(0)
        })
        .expect("count");
    assert_eq!(rows, 0);
}

#[test]
fn append_then_read_roundtrips_all_four_fields_in_order() {
    let db_path = setup_test_db("roundtrip");

    let records = vec![
        sample_record("write report", 25),
        sample_record("short rest", 5),
        sample_record("deep work", 3),
    ];

    let mut log = SessionLog::open(&db_path).expect("open");
    for r in &records {
        log.append(r).expect("append");
    }
    log.close().expect("close");

    let conn = Connection::open(&db_path).expect("reopen");
    let mut stmt = conn
        .prepare(&format!(
            "SELECT task, start, finish, duration_min FROM {} ORDER BY rowid ASC",
            TABLE_NAME
        ))
        .expect("prepare");
    let rows: Vec<(String, String, String, i64)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })
        .expect("query")
        .map(|r| r.expect("row"))
        .collect();

    assert_eq!(rows.len(), records.len());
    for (row, rec) in rows.iter().zip(records.iter()) {
        assert_eq!(row.0, rec.task_name);
        assert_eq!(row.1, rec.start_str());
        assert_eq!(row.2, rec.finish_str());
        assert_eq!(row.3, rec.elapsed_minutes);
    }
}

#[test]
fn close_is_idempotent_and_keeps_rows() {
    let db_path = setup_test_db("close_twice");

    let mut log = SessionLog::open(&db_path).expect("open");
    log.append(&sample_record("write report", 25)).expect("append");

    log.close().expect("first close");
    log.close().expect("second close");
    assert!(!log.is_open());

    let conn = Connection::open(&db_path).expect("reopen");
    let rows: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", TABLE_NAME), [], |row| {
            row.get(0)
        })
        .expect("count");
    assert_eq!(rows, 1);
}

#[test]
fn append_after_close_reports_closed_log() {
    let db_path = setup_test_db("append_closed");

    let mut log = SessionLog::open(&db_path).expect("open");
    log.close().expect("close");

    let err = log.append(&sample_record("late", 1)).unwrap_err();
    assert!(matches!(err, AppError::LogClosed));
}

#[test]
fn rows_accumulate_across_reopens() {
    let db_path = setup_test_db("reopen");

    let mut log = SessionLog::open(&db_path).expect("first open");
    log.append(&sample_record("write report", 25)).expect("append");
    log.close().expect("close");

    let mut log = SessionLog::open(&db_path).expect("second open");
    log.append(&sample_record("short rest", 5)).expect("append");
    log.close().expect("close");

    let conn = Connection::open(&db_path).expect("reopen");
    let rows: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", TABLE_NAME), [], |row| {
            row.get(0)
        })
        .expect("count");
    assert_eq!(rows, 2);
}

#[test]
fn mismatched_schema_is_set_aside_not_destroyed() {
    let db_path = setup_test_db("mismatch");

    // A store created by some incompatible prior version.
    {
        let conn = Connection::open(&db_path).expect("precreate");
        conn.execute_batch(&format!(
            "CREATE TABLE {} (task TEXT, begun TEXT); INSERT INTO {} VALUES ('old', 'x');",
            TABLE_NAME, TABLE_NAME
        ))
        .expect("seed");
    }

    let mut log = SessionLog::open(&db_path).expect("open");
    log.append(&sample_record("fresh", 1)).expect("append");
    log.close().expect("close");

    let conn = Connection::open(&db_path).expect("reopen");

    // The live table has the fixed schema and only the fresh row.
    assert_eq!(column_names(&conn), COLUMNS.to_vec());
    let rows: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", TABLE_NAME), [], |row| {
            row.get(0)
        })
        .expect("count");
    assert_eq!(rows, 1);

    // The incompatible table was renamed aside with its row intact.
    let backup: String = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name LIKE ?1",
            [format!("{}_old_%", TABLE_NAME)],
            |row| row.get(0),
        )
        .expect("backup table");
    let old_rows: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", backup), [], |row| {
            row.get(0)
        })
        .expect("old count");
    assert_eq!(old_rows, 1);
}

#[test]
fn schema_state_is_classified_as_tagged_result() {
    let conn = Connection::open_in_memory().expect("memory db");

    assert_eq!(schema::check_schema(&conn).expect("absent"), SchemaState::Absent);

    schema::create_log_table(&conn).expect("create");
    assert_eq!(schema::check_schema(&conn).expect("ok"), SchemaState::Ok);

    conn.execute_batch(&format!(
        "DROP TABLE {}; CREATE TABLE {} (task TEXT, start TEXT);",
        TABLE_NAME, TABLE_NAME
    ))
    .expect("mangle");
    assert_eq!(
        schema::check_schema(&conn).expect("mismatch"),
        SchemaState::Mismatch
    );
}
