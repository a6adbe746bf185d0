//! Salary ranking with gap to the next salary (q3)

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::Employee;
use crate::store::Snapshot;

use super::errors::{ReportError, ReportResult};
use super::lookup::{normalize_key, Directory};

/// One employee's standing within their (location, department) group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRankRow {
    pub location_name: String,
    pub department_name: String,
    pub employee_name: Option<String>,
    pub position_name: Option<String>,
    pub salary: Option<Decimal>,
    pub salary_rank: u64,
    pub salary_gap: Decimal,
}

/// Ranking scope. Null location and blank department code are valid keys.
type GroupKey<'a> = (Option<i64>, Option<&'a str>);

fn group_key(emp: &Employee) -> GroupKey<'_> {
    (emp.location_id, normalize_key(emp.dept_code.as_deref()))
}

/// Rank every employee by distinct salary within their group
///
/// `salary_rank` is 1 + the number of distinct salaries strictly above the
/// employee's; equal salaries share a rank. `salary_gap` is the distance to
/// the next distinct salary above, or zero for the top earner. An employee
/// with no salary has nothing above them: rank 1, gap 0.
///
/// Ordered by location name, department name, then salary descending with
/// missing salaries first; remaining ties keep employee id order.
pub fn salary_ranking(snapshot: &Snapshot) -> ReportResult<Vec<SalaryRankRow>> {
    let directory = Directory::new(snapshot);

    let mut ladders: HashMap<GroupKey<'_>, BTreeSet<Decimal>> = HashMap::new();
    for emp in &snapshot.employees {
        let ladder = ladders.entry(group_key(emp)).or_default();
        if let Some(salary) = emp.salary {
            ladder.insert(salary);
        }
    }

    let mut rows: Vec<SalaryRankRow> = snapshot
        .employees
        .iter()
        .map(|emp| {
            let ladder = &ladders[&group_key(emp)];
            let (salary_rank, salary_gap) = standing(ladder, emp.salary)?;
            Ok(SalaryRankRow {
                location_name: directory.location_name(emp.location_id),
                department_name: directory.department_name(emp.dept_code.as_deref()),
                employee_name: emp.name.clone(),
                position_name: emp.position.clone(),
                salary: emp.salary,
                salary_rank,
                salary_gap,
            })
        })
        .collect::<ReportResult<_>>()?;

    rows.sort_by(|a, b| {
        a.location_name
            .cmp(&b.location_name)
            .then_with(|| a.department_name.cmp(&b.department_name))
            .then_with(|| a.salary.map(Reverse).cmp(&b.salary.map(Reverse)))
    });
    Ok(rows)
}

/// Rank and gap of `salary` on a ladder of distinct salaries
fn standing(
    ladder: &BTreeSet<Decimal>,
    salary: Option<Decimal>,
) -> ReportResult<(u64, Decimal)> {
    let Some(salary) = salary else {
        return Ok((1, Decimal::ZERO));
    };

    let above = || ladder.range((Bound::Excluded(salary), Bound::Unbounded));
    let rank = 1 + above().count() as u64;
    let gap = match above().next() {
        Some(next) => next
            .checked_sub(salary)
            .ok_or(ReportError::Overflow { report: "q3" })?,
        None => Decimal::ZERO,
    };
    Ok((rank, gap))
}
