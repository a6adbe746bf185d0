//! Row mapping
//!
//! Every persisted entity implements [`Record`], which is enough for the
//! generic CRUD helpers below to read and write it. Column lists are
//! compile-time constants, so the SQL built here never embeds caller input.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::model::{ApiCallRecord, Department, Employee, Location, Tier};

use super::errors::{StoreError, StoreResult};

/// A table-backed entity with an integer primary key named `id`
pub trait Record: Sized {
    /// Table name
    const TABLE: &'static str;

    /// Data columns, in the order produced by [`Record::values`]
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Decode a row selected as `id, COLUMNS...`
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Encode the data columns
    fn values(&self) -> Vec<SqlValue>;
}

fn text(value: &Option<String>) -> SqlValue {
    value.clone().map_or(SqlValue::Null, SqlValue::Text)
}

fn decimal_text(value: &Option<Decimal>) -> SqlValue {
    value.map_or(SqlValue::Null, |d| SqlValue::Text(d.to_string()))
}

fn conversion_error(
    index: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        rusqlite::types::Type::Text,
        Box::new(err),
    )
}

fn decimal_column(row: &Row<'_>, index: usize) -> rusqlite::Result<Option<Decimal>> {
    let raw: Option<String> = row.get(index)?;
    raw.map(|s| Decimal::from_str(&s).map_err(|e| conversion_error(index, e)))
        .transpose()
}

impl Record for Location {
    const TABLE: &'static str = "location";
    const COLUMNS: &'static [&'static str] = &["code", "name"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![text(&self.code), text(&self.name)]
    }
}

impl Record for Department {
    const TABLE: &'static str = "department";
    const COLUMNS: &'static [&'static str] = &["code", "name"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![text(&self.code), text(&self.name)]
    }
}

impl Record for Tier {
    const TABLE: &'static str = "tier";
    const COLUMNS: &'static [&'static str] = &["code", "name"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![text(&self.code), text(&self.name)]
    }
}

impl Record for Employee {
    const TABLE: &'static str = "employee";
    const COLUMNS: &'static [&'static str] = &[
        "emp_no",
        "name",
        "dept_code",
        "location_id",
        "position",
        "salary",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            emp_no: row.get(1)?,
            name: row.get(2)?,
            dept_code: row.get(3)?,
            location_id: row.get(4)?,
            position: row.get(5)?,
            salary: decimal_column(row, 6)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.emp_no.clone()),
            text(&self.name),
            text(&self.dept_code),
            self.location_id.map_or(SqlValue::Null, SqlValue::Integer),
            text(&self.position),
            decimal_text(&self.salary),
        ]
    }
}

impl Record for ApiCallRecord {
    const TABLE: &'static str = "api_call_history";
    const COLUMNS: &'static [&'static str] =
        &["timestamp", "method", "path", "status", "user_identifier"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let raw: String = row.get(1)?;
        let timestamp = DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| conversion_error(1, e))?
            .with_timezone(&Utc);

        Ok(Self {
            id: row.get(0)?,
            timestamp,
            method: row.get(2)?,
            path: row.get(3)?,
            status: row.get(4)?,
            user_identifier: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.timestamp.to_rfc3339()),
            SqlValue::Text(self.method.clone()),
            SqlValue::Text(self.path.clone()),
            self.status
                .map_or(SqlValue::Null, |s| SqlValue::Integer(i64::from(s))),
            text(&self.user_identifier),
        ]
    }
}

fn select_clause<R: Record>() -> String {
    format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
}

/// All rows of a table, ordered by id
pub fn list_records<R: Record>(conn: &Connection) -> StoreResult<Vec<R>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", select_clause::<R>()))?;
    let rows = stmt.query_map([], R::from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Fetch a row by id
pub fn get_record<R: Record>(conn: &Connection, id: i64) -> StoreResult<R> {
    conn.query_row(
        &format!("{} WHERE id = ?1", select_clause::<R>()),
        [id],
        R::from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound { table: R::TABLE, id })
}

/// First row (lowest id) whose `column` equals `value`
pub fn find_record_by<R: Record>(
    conn: &Connection,
    column: &str,
    value: &str,
) -> StoreResult<Option<R>> {
    debug_assert!(R::COLUMNS.contains(&column));
    let found = conn
        .query_row(
            &format!(
                "{} WHERE {} = ?1 ORDER BY id LIMIT 1",
                select_clause::<R>(),
                column
            ),
            [value],
            R::from_row,
        )
        .optional()?;
    Ok(found)
}

/// Insert a record; the stored id is assigned by the database
pub fn insert_record<R: Record>(conn: &Connection, mut record: R) -> StoreResult<R> {
    let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("?{}", i)).collect();
    conn.execute(
        &format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders.join(", ")
        ),
        params_from_iter(record.values()),
    )?;
    record.set_id(conn.last_insert_rowid());
    Ok(record)
}

/// Overwrite every data column of row `id`
pub fn update_record<R: Record>(conn: &Connection, id: i64, mut record: R) -> StoreResult<R> {
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ?{}", col, i + 1))
        .collect();
    let mut values = record.values();
    values.push(SqlValue::Integer(id));

    let changed = conn.execute(
        &format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            R::TABLE,
            assignments.join(", "),
            R::COLUMNS.len() + 1
        ),
        params_from_iter(values),
    )?;
    if changed == 0 {
        return Err(StoreError::NotFound { table: R::TABLE, id });
    }

    record.set_id(id);
    Ok(record)
}

/// Delete row `id`; deleting a missing row is not an error
pub fn delete_record<R: Record>(conn: &Connection, id: i64) -> StoreResult<bool> {
    let changed = conn.execute(&format!("DELETE FROM {} WHERE id = ?1", R::TABLE), [id])?;
    Ok(changed > 0)
}
