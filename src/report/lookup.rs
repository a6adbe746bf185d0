//! Name resolution for loose references
//!
//! Employees point at departments through free-text codes and at locations
//! through ids that are not foreign keys. Both lookups may miss; a miss
//! resolves to [`UNASSIGNED`], never an error.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{Department, Location};
use crate::store::Snapshot;

/// Display value for a missing or blank name
pub const UNASSIGNED: &str = "UNASSIGNED";

/// Trim a free-text key; blank becomes `None`
pub fn normalize_key(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Name to display, substituting [`UNASSIGNED`] for null or blank
pub fn display_name(value: Option<&str>) -> String {
    normalize_key(value).unwrap_or(UNASSIGNED).to_string()
}

/// Ascending order with `None` after every `Some`
pub fn cmp_nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Indexed view over departments and locations
pub struct Directory<'a> {
    departments: HashMap<&'a str, &'a Department>,
    locations: HashMap<i64, &'a Location>,
}

impl<'a> Directory<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let mut departments = HashMap::new();
        // Snapshot rows are ordered by id: the first department with a
        // given code wins.
        for dept in &snapshot.departments {
            if let Some(code) = normalize_key(dept.code.as_deref()) {
                departments.entry(code).or_insert(dept);
            }
        }

        let locations = snapshot.locations.iter().map(|l| (l.id, l)).collect();

        Self {
            departments,
            locations,
        }
    }

    /// Department for an employee's `dept_code`, if any matches
    pub fn department(&self, code: Option<&str>) -> Option<&'a Department> {
        normalize_key(code).and_then(|c| self.departments.get(c).copied())
    }

    /// Location for an employee's `location_id`, if it exists
    pub fn location(&self, id: Option<i64>) -> Option<&'a Location> {
        id.and_then(|id| self.locations.get(&id).copied())
    }

    /// Display name of the department an employee belongs to
    pub fn department_name(&self, code: Option<&str>) -> String {
        display_name(self.department(code).and_then(|d| d.name.as_deref()))
    }

    /// Display name of the location an employee works at
    pub fn location_name(&self, id: Option<i64>) -> String {
        display_name(self.location(id).and_then(|l| l.name.as_deref()))
    }
}
