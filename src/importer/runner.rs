//! Sheet-to-table import
//!
//! Sheets are loaded in dependency order (locations before employees, so
//! location codes can be resolved). Each sheet is applied in its own
//! transaction: a failing sheet is rolled back and logged while the others
//! still run.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::Transaction;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::{Department, Employee, Location, Tier};
use crate::store::record::{find_record_by, insert_record, list_records, update_record};
use crate::store::{Database, Record, StoreResult};

use super::errors::ImportError;
use super::sheet::{cell_decimal, cell_text, Sheet};

pub const LOCATION_SHEET: &str = "location.csv";
pub const DEPARTMENT_SHEET: &str = "department.csv";
pub const TIER_SHEET: &str = "tier.csv";
pub const EMPLOYEE_SHEET: &str = "employee.csv";

/// Row counts for one sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SheetOutcome {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl SheetOutcome {
    /// Rows written, new or updated
    pub fn applied(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Result of a full import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub locations: SheetOutcome,
    pub departments: SheetOutcome,
    pub tiers: SheetOutcome,
    pub employees: SheetOutcome,
}

/// A `code, name` reference sheet entity
trait ReferenceRecord: Record {
    fn from_cells(code: Option<String>, name: Option<String>) -> Self;
}

impl ReferenceRecord for Location {
    fn from_cells(code: Option<String>, name: Option<String>) -> Self {
        Self { id: 0, code, name }
    }
}

impl ReferenceRecord for Department {
    fn from_cells(code: Option<String>, name: Option<String>) -> Self {
        Self { id: 0, code, name }
    }
}

impl ReferenceRecord for Tier {
    fn from_cells(code: Option<String>, name: Option<String>) -> Self {
        Self { id: 0, code, name }
    }
}

/// Bulk loader over a directory of sheets
pub struct Importer {
    db: Database,
}

impl Importer {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Import every sheet found in `dir`
    ///
    /// Never fails as a whole: a missing directory yields an empty summary,
    /// a missing sheet counts as zero rows.
    pub fn run(&self, dir: &Path) -> ImportSummary {
        if !dir.is_dir() {
            info!(path = %dir.display(), "import path not found, skipping import");
            return ImportSummary::default();
        }

        let summary = ImportSummary {
            locations: self.load(dir, LOCATION_SHEET, import_reference::<Location>),
            departments: self.load(dir, DEPARTMENT_SHEET, import_reference::<Department>),
            tiers: self.load(dir, TIER_SHEET, import_reference::<Tier>),
            employees: self.load(dir, EMPLOYEE_SHEET, import_employees),
        };

        info!(
            locations = summary.locations.applied(),
            departments = summary.departments.applied(),
            tiers = summary.tiers.applied(),
            employees = summary.employees.applied(),
            "import finished"
        );
        summary
    }

    fn load<F>(&self, dir: &Path, file: &str, apply: F) -> SheetOutcome
    where
        F: FnOnce(&Transaction<'_>, &Sheet) -> StoreResult<SheetOutcome>,
    {
        let path = dir.join(file);
        if !path.is_file() {
            debug!(sheet = file, "sheet not present");
            return SheetOutcome::default();
        }

        let result = Sheet::read(&path).and_then(|sheet| {
            self.db
                .transaction(|tx| apply(tx, &sheet))
                .map_err(ImportError::from)
        });

        match result {
            Ok(outcome) => {
                debug!(
                    sheet = file,
                    inserted = outcome.inserted,
                    updated = outcome.updated,
                    skipped = outcome.skipped,
                    "sheet imported"
                );
                outcome
            }
            Err(e) => {
                warn!(sheet = file, error = %e, "sheet import failed, rolled back");
                SheetOutcome::default()
            }
        }
    }
}

/// Upsert `code, name` rows; an existing row with the same code is updated
fn import_reference<R: ReferenceRecord>(
    tx: &Transaction<'_>,
    sheet: &Sheet,
) -> StoreResult<SheetOutcome> {
    let mut outcome = SheetOutcome::default();

    for row in sheet.rows() {
        let code = cell_text(row, 0);
        let name = cell_text(row, 1);
        if code.is_none() && name.is_none() {
            outcome.skipped += 1;
            continue;
        }

        let existing: Option<R> = match code.as_deref() {
            Some(code) => find_record_by(tx, "code", code)?,
            None => None,
        };

        let incoming = R::from_cells(code, name);
        match existing {
            Some(current) => {
                update_record(tx, current.id(), incoming)?;
                outcome.updated += 1;
            }
            None => {
                insert_record(tx, incoming)?;
                outcome.inserted += 1;
            }
        }
    }

    Ok(outcome)
}

/// Upsert employee rows keyed by `emp_no`
///
/// Columns: emp_no, name, dept_code, location (id or code), position, salary.
fn import_employees(tx: &Transaction<'_>, sheet: &Sheet) -> StoreResult<SheetOutcome> {
    let mut location_codes: HashMap<String, i64> = HashMap::new();
    for loc in list_records::<Location>(tx)? {
        if let Some(code) = loc.code {
            location_codes.entry(code.trim().to_string()).or_insert(loc.id);
        }
    }

    let mut outcome = SheetOutcome::default();

    for row in sheet.rows() {
        let Some(emp_no) = cell_text(row, 0) else {
            outcome.skipped += 1;
            continue;
        };

        let incoming = Employee {
            id: 0,
            name: cell_text(row, 1),
            dept_code: cell_text(row, 2),
            location_id: cell_text(row, 3)
                .and_then(|raw| resolve_location(&raw, &location_codes)),
            position: cell_text(row, 4),
            salary: cell_decimal(row, 5),
            emp_no,
        };

        match find_record_by::<Employee>(tx, "emp_no", &incoming.emp_no)? {
            Some(current) => {
                update_record(tx, current.id, incoming)?;
                outcome.updated += 1;
            }
            None => {
                insert_record(tx, incoming)?;
                outcome.inserted += 1;
            }
        }
    }

    Ok(outcome)
}

/// Numeric cells are taken as ids as-is; anything else is looked up as a code
fn resolve_location(raw: &str, codes: &HashMap<String, i64>) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| codes.get(raw).copied())
}
