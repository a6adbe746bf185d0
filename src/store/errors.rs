//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write violated a table constraint (NOT NULL, UNIQUE, CHECK)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// No row with the requested id
    #[error("{table} {id} not found")]
    NotFound { table: &'static str, id: i64 },

    /// Connection mutex was poisoned by a panicking writer
    #[error("Database lock poisoned")]
    LockPoisoned,

    /// Filesystem error while preparing the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other SQLite failure
    #[error("Database error: {0}")]
    Sqlite(rusqlite::Error),
}

impl StoreError {
    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::ConstraintViolation(_) | StoreError::NotFound { .. }
        )
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::ConstraintViolation(
                    message.unwrap_or_else(|| code.to_string()),
                )
            }
            other => StoreError::Sqlite(other),
        }
    }
}
