//! API call history
//!
//! Request handlers hand finished-call records to a bounded channel; a
//! background task drains it into a [`CallSink`]. Submitting never blocks
//! and never fails the caller. A full or closed channel, or a sink error,
//! drops the record: delivery is at most once.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::model::ApiCallRecord;
use crate::store::{Database, StoreError, StoreResult};

/// Destination for call records
pub trait CallSink: Send + Sync + 'static {
    fn write(&self, record: ApiCallRecord) -> StoreResult<()>;
}

impl CallSink for Database {
    fn write(&self, record: ApiCallRecord) -> StoreResult<()> {
        self.insert(record).map(|_| ())
    }
}

/// In-memory sink for tests
#[derive(Default)]
pub struct MemoryCallSink {
    records: Mutex<Vec<ApiCallRecord>>,
}

impl MemoryCallSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ApiCallRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl CallSink for MemoryCallSink {
    fn write(&self, record: ApiCallRecord) -> StoreResult<()> {
        self.records
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(record);
        Ok(())
    }
}

/// Handle for submitting call records
#[derive(Clone)]
pub struct CallLog {
    tx: mpsc::Sender<ApiCallRecord>,
}

impl CallLog {
    /// Spawn the writer task on the current tokio runtime
    pub fn start<S: CallSink>(sink: Arc<S>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(drain(sink, rx));
        Self { tx }
    }

    /// A log that drops everything
    pub fn disabled() -> Self {
        let (tx, _) = mpsc::channel(1);
        Self { tx }
    }

    /// Queue a record without waiting
    pub fn submit(&self, record: ApiCallRecord) {
        if let Err(e) = self.tx.try_send(record) {
            trace!(error = %e, "api call record dropped");
        }
    }
}

async fn drain<S: CallSink>(sink: Arc<S>, mut rx: mpsc::Receiver<ApiCallRecord>) {
    while let Some(record) = rx.recv().await {
        let sink = Arc::clone(&sink);
        let written = tokio::task::spawn_blocking(move || sink.write(record)).await;
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(error = %e, "api call record not stored"),
            Err(e) => debug!(error = %e, "api call writer task failed"),
        }
    }
}
