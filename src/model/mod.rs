//! Domain entities
//!
//! Flat records for the four organizational relations plus the API call
//! history row. JSON field names are camelCase to match what API clients
//! send and expect.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A physical office or site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// An organizational unit
///
/// `code` is the text key employees reference through `dept_code`. It is
/// not enforced unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A grade band. Not consulted by any report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A staff member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: i64,
    /// Natural key. Blank values are rejected by the store.
    #[serde(default)]
    pub emp_no: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Loose reference to `Department::code`; may match nothing.
    #[serde(default)]
    pub dept_code: Option<String>,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<Decimal>,
}

impl Employee {
    /// Create an employee with only the natural key set
    pub fn new(emp_no: impl Into<String>) -> Self {
        Self {
            emp_no: emp_no.into(),
            ..Default::default()
        }
    }
}

/// One served `/api` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallRecord {
    #[serde(default)]
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub user_identifier: Option<String>,
}

impl ApiCallRecord {
    /// Stamp a new record with the current time
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        status: u16,
        user_identifier: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            timestamp: Utc::now(),
            method: method.into(),
            path: path.into(),
            status: Some(status),
            user_identifier,
        }
    }
}
