//! Importer error types

use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// A sheet could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisting a sheet failed
    #[error("{0}")]
    Store(#[from] StoreError),
}
