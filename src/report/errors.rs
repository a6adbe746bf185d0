//! Report errors

use thiserror::Error;

/// Result type for report computation
pub type ReportResult<T> = Result<T, ReportError>;

/// Report errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// A salary sum or difference left the representable decimal range
    #[error("salary arithmetic overflowed in report {report}")]
    Overflow { report: &'static str },

    #[error("failed to serialize report rows: {0}")]
    Serialize(#[from] serde_json::Error),
}
