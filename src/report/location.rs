//! Department analysis by location (q2)

use std::collections::{BTreeMap, HashMap};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::Employee;
use crate::store::Snapshot;

use super::errors::{ReportError, ReportResult};
use super::lookup::{display_name, Directory, UNASSIGNED};

/// Per-location summary
///
/// `avg_salary_of_lowest_dept` is the average over every employee at the
/// location, not over any single department. The field name is kept
/// because API clients already depend on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDepartmentRow {
    pub location_name: String,
    pub dept_with_most_employees: Option<String>,
    pub dept_employee_count: u64,
    pub avg_salary_of_lowest_dept: Option<Decimal>,
}

/// One row per location table row, plus an UNASSIGNED bucket for employees
/// whose location is null or missing (only when such employees exist)
///
/// Rows are ordered by display name; the synthetic bucket sorts after any
/// real location that also displays as UNASSIGNED.
pub fn department_by_location(snapshot: &Snapshot) -> ReportResult<Vec<LocationDepartmentRow>> {
    let directory = Directory::new(snapshot);

    let mut by_location: HashMap<Option<i64>, Vec<&Employee>> = HashMap::new();
    for emp in &snapshot.employees {
        let key = directory.location(emp.location_id).map(|l| l.id);
        by_location.entry(key).or_default().push(emp);
    }

    let mut rows: Vec<LocationDepartmentRow> = snapshot
        .locations
        .iter()
        .map(|loc| {
            let staff = by_location.get(&Some(loc.id)).map(Vec::as_slice).unwrap_or(&[]);
            summarize(display_name(loc.name.as_deref()), staff, &directory)
        })
        .collect::<ReportResult<_>>()?;

    if let Some(staff) = by_location.get(&None) {
        rows.push(summarize(UNASSIGNED.to_string(), staff, &directory)?);
    }

    // Stable: real locations keep id order among equal names, the bucket
    // stays last.
    rows.sort_by(|a, b| a.location_name.cmp(&b.location_name));
    Ok(rows)
}

fn summarize(
    location_name: String,
    staff: &[&Employee],
    directory: &Directory<'_>,
) -> ReportResult<LocationDepartmentRow> {
    let mut headcount: BTreeMap<String, u64> = BTreeMap::new();
    for emp in staff {
        *headcount
            .entry(directory.department_name(emp.dept_code.as_deref()))
            .or_insert(0) += 1;
    }

    // BTreeMap iterates names ascending, so keeping only strictly larger
    // counts breaks ties by name.
    let mut leader: Option<(String, u64)> = None;
    for (name, count) in headcount {
        if leader.as_ref().map_or(true, |(_, best)| count > *best) {
            leader = Some((name, count));
        }
    }

    let (dept_with_most_employees, dept_employee_count) = match leader {
        Some((name, count)) => (Some(name), count),
        None => (None, 0),
    };

    Ok(LocationDepartmentRow {
        location_name,
        dept_with_most_employees,
        dept_employee_count,
        avg_salary_of_lowest_dept: average_salary(staff)?,
    })
}

/// Mean of the recorded salaries, rounded half away from zero to 2 places
fn average_salary(staff: &[&Employee]) -> ReportResult<Option<Decimal>> {
    let salaries: Vec<Decimal> = staff.iter().filter_map(|e| e.salary).collect();
    if salaries.is_empty() {
        return Ok(None);
    }

    let total = salaries
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(*s))
        .ok_or(ReportError::Overflow { report: "q2" })?;
    let mean = total / Decimal::from(salaries.len());
    Ok(Some(mean.round_dp_with_strategy(
        2,
        RoundingStrategy::MidpointAwayFromZero,
    )))
}
