//! # Salary Reports
//!
//! Three read-only reports computed from a [`Snapshot`]:
//!
//! - `q1` cumulative salary per department
//! - `q2` leading department, headcount and average salary per location
//! - `q3` salary rank and gap to the next salary per (location, department)
//!
//! Every report is a pure function of the snapshot. Running one twice over
//! the same data yields identical rows in identical order.

mod cumulative;
mod errors;
mod location;
mod lookup;
mod ranking;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::store::Snapshot;

pub use cumulative::{cumulative_salary, CumulativeSalaryRow};
pub use errors::{ReportError, ReportResult};
pub use location::{department_by_location, LocationDepartmentRow};
pub use lookup::UNASSIGNED;
pub use ranking::{salary_ranking, SalaryRankRow};

/// Report selector used by the CLI and the query routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Cumulative salary
    Q1,
    /// Department analysis by location
    Q2,
    /// Salary ranking
    Q3,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Q1, ReportKind::Q2, ReportKind::Q3];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Q1 => "q1",
            ReportKind::Q2 => "q2",
            ReportKind::Q3 => "q3",
        }
    }

    /// Compute the report and serialize its rows as a JSON array
    pub fn render(&self, snapshot: &Snapshot) -> ReportResult<Value> {
        let rows = match self {
            ReportKind::Q1 => serde_json::to_value(cumulative_salary(snapshot)?)?,
            ReportKind::Q2 => serde_json::to_value(department_by_location(snapshot)?)?,
            ReportKind::Q3 => serde_json::to_value(salary_ranking(snapshot)?)?,
        };
        Ok(rows)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q1" => Ok(ReportKind::Q1),
            "q2" => Ok(ReportKind::Q2),
            "q3" => Ok(ReportKind::Q3),
            other => Err(format!("Unknown report '{}'. Expected q1, q2 or q3.", other)),
        }
    }
}
