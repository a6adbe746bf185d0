//! Shared database handle
//!
//! A single SQLite connection behind a mutex. Clones share the connection,
//! so one handle can be handed to HTTP handlers, the importer and the call
//! log writer alike.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Transaction};
use tracing::debug;

use crate::model::{Department, Employee, Location, Tier};

use super::errors::{StoreError, StoreResult};
use super::record::{self, Record};
use super::schema;

/// Point-in-time copy of the four organizational relations
///
/// This is the read-only view every report is computed from.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub locations: Vec<Location>,
    pub departments: Vec<Department>,
    pub tiers: Vec<Tier>,
    pub employees: Vec<Employee>,
}

/// Database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a database file and apply the schema
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        debug!(path = %path.display(), "opened database");
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        schema::apply(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// List every row of `R`, ordered by id
    pub fn list<R: Record>(&self) -> StoreResult<Vec<R>> {
        let conn = self.lock()?;
        record::list_records(&conn)
    }

    /// Fetch one row of `R`
    pub fn get<R: Record>(&self, id: i64) -> StoreResult<R> {
        let conn = self.lock()?;
        record::get_record(&conn, id)
    }

    /// Insert a new row; any id on `record` is ignored
    pub fn insert<R: Record>(&self, record: R) -> StoreResult<R> {
        let conn = self.lock()?;
        record::insert_record(&conn, record)
    }

    /// Replace row `id` with `record`
    pub fn update<R: Record>(&self, id: i64, record: R) -> StoreResult<R> {
        let conn = self.lock()?;
        record::update_record(&conn, id, record)
    }

    /// Delete row `id`. Returns whether a row was removed.
    pub fn delete<R: Record>(&self, id: i64) -> StoreResult<bool> {
        let conn = self.lock()?;
        record::delete_record::<R>(&conn, id)
    }

    /// First row whose `column` equals `value`
    pub fn find_by<R: Record>(&self, column: &str, value: &str) -> StoreResult<Option<R>> {
        let conn = self.lock()?;
        record::find_record_by(&conn, column, value)
    }

    /// Run `f` inside a transaction; commits on `Ok`, rolls back on `Err`
    pub fn transaction<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> StoreResult<T>,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Read all four relations under a single lock
    pub fn snapshot(&self) -> StoreResult<Snapshot> {
        let conn = self.lock()?;
        Ok(Snapshot {
            locations: record::list_records(&conn)?,
            departments: record::list_records(&conn)?,
            tiers: record::list_records(&conn)?,
            employees: record::list_records(&conn)?,
        })
    }
}
