//! Table definitions
//!
//! Applied on every open; all statements are idempotent.

use rusqlite::Connection;

use super::errors::StoreResult;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS location (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT,
    name TEXT
);

CREATE TABLE IF NOT EXISTS department (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT,
    name TEXT
);

CREATE TABLE IF NOT EXISTS tier (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT,
    name TEXT
);

CREATE TABLE IF NOT EXISTS employee (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    emp_no      TEXT NOT NULL UNIQUE CHECK (length(trim(emp_no)) > 0),
    name        TEXT,
    dept_code   TEXT,
    location_id INTEGER,
    position    TEXT,
    salary      TEXT
);

CREATE TABLE IF NOT EXISTS api_call_history (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp       TEXT NOT NULL,
    method          TEXT NOT NULL,
    path            TEXT NOT NULL,
    status          INTEGER,
    user_identifier TEXT
);

CREATE INDEX IF NOT EXISTS idx_department_code ON department(code);
CREATE INDEX IF NOT EXISTS idx_location_code ON location(code);
CREATE INDEX IF NOT EXISTS idx_tier_code ON tier(code);
";

/// Create all tables and indexes that do not exist yet
pub fn apply(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
