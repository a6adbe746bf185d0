//! Cumulative salary per department (q1)

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::Employee;
use crate::store::Snapshot;

use super::errors::{ReportError, ReportResult};
use super::lookup::{cmp_nulls_last, normalize_key};

/// One employee with the running salary total of their department
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeSalaryRow {
    pub dept_code: Option<String>,
    pub emp_no: String,
    pub emp_name: Option<String>,
    pub cumulative_salary: Decimal,
}

fn dept_key(emp: &Employee) -> Option<&str> {
    normalize_key(emp.dept_code.as_deref())
}

/// Running salary sum within each department, in `(dept_code, emp_no)` order
///
/// Employees without a department form their own group, ordered last.
/// A missing salary counts as zero. Employees sharing an `emp_no` inside a
/// group receive the same total: the sum over every peer with
/// `emp_no <=` theirs.
///
/// Fails only when a running total leaves the decimal range.
pub fn cumulative_salary(snapshot: &Snapshot) -> ReportResult<Vec<CumulativeSalaryRow>> {
    let mut employees: Vec<&Employee> = snapshot.employees.iter().collect();
    employees.sort_by(|a, b| {
        cmp_nulls_last(dept_key(a), dept_key(b)).then_with(|| a.emp_no.cmp(&b.emp_no))
    });

    let mut rows = Vec::with_capacity(employees.len());
    let mut group: Option<Option<&str>> = None;
    let mut running = Decimal::ZERO;

    for peers in employees.chunk_by(|a, b| dept_key(a) == dept_key(b) && a.emp_no == b.emp_no) {
        let key = dept_key(peers[0]);
        if group != Some(key) {
            group = Some(key);
            running = Decimal::ZERO;
        }

        for peer in peers {
            running = running
                .checked_add(peer.salary.unwrap_or(Decimal::ZERO))
                .ok_or(ReportError::Overflow { report: "q1" })?;
        }

        rows.extend(peers.iter().map(|e| CumulativeSalaryRow {
            dept_code: key.map(str::to_string),
            emp_no: e.emp_no.clone(),
            emp_name: e.name.clone(),
            cumulative_salary: running,
        }));
    }

    Ok(rows)
}
