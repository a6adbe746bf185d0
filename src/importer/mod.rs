//! # Bulk Importer
//!
//! Loads reference data and employees from a directory of sheet exports:
//!
//! | Sheet            | Columns                                              |
//! |------------------|------------------------------------------------------|
//! | `location.csv`   | code, name                                           |
//! | `department.csv` | code, name                                           |
//! | `tier.csv`       | code, name                                           |
//! | `employee.csv`   | emp_no, name, dept_code, location, position, salary  |
//!
//! Blank or malformed cells become null. Only an employee row without an
//! `emp_no` is dropped. Re-running an import updates rows in place.

mod errors;
mod runner;
mod sheet;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use errors::{ImportError, ImportResult};
pub use runner::{ImportSummary, Importer, SheetOutcome};
pub use sheet::Sheet;

/// Importer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Directory holding the sheets (default: "sample-project")
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Run the import when the server starts (default: true)
    #[serde(default = "default_on_start")]
    pub on_start: bool,
}

fn default_path() -> PathBuf {
    PathBuf::from("sample-project")
}

fn default_on_start() -> bool {
    true
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            on_start: default_on_start(),
        }
    }
}
