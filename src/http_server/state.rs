//! Shared handler state

use std::sync::Arc;

use crate::observability::CallLog;
use crate::store::Database;

use super::errors::{ApiError, ApiResult};

/// State shared by every `/api` handler
pub struct ApiState {
    pub db: Database,
    pub call_log: CallLog,
}

impl ApiState {
    pub fn new(db: Database, call_log: CallLog) -> Self {
        Self { db, call_log }
    }

    /// State whose call log drops every record
    pub fn without_call_log(db: Database) -> Self {
        Self::new(db, CallLog::disabled())
    }

    /// Run `f` against the database on the blocking thread pool
    pub async fn blocking<T, E, F>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&Database) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
        ApiError: From<E>,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| ApiError::Internal(format!("database task failed: {}", e)))?
            .map_err(ApiError::from)
    }
}

/// Shared state type
pub type SharedState = Arc<ApiState>;
