//! Report Property Tests
//!
//! End-to-end checks of the three salary reports against a real SQLite
//! database:
//! - Running sums per department (q1)
//! - Location completeness and the UNASSIGNED bucket (q2)
//! - Distinct-salary ranks and gaps (q3)
//! - Repeat runs are identical

use orgstat::model::{Department, Employee, Location};
use orgstat::report::{
    cumulative_salary, department_by_location, salary_ranking, ReportKind, UNASSIGNED,
};
use orgstat::store::Database;
use rust_decimal::Decimal;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn open_db() -> (TempDir, Database) {
    let tmp = TempDir::new().unwrap();
    let db = Database::open(&tmp.path().join("org.db")).unwrap();
    (tmp, db)
}

fn location(db: &Database, code: &str, name: &str) -> Location {
    db.insert(Location {
        id: 0,
        code: Some(code.to_string()),
        name: Some(name.to_string()),
    })
    .unwrap()
}

fn department(db: &Database, code: &str, name: &str) -> Department {
    db.insert(Department {
        id: 0,
        code: Some(code.to_string()),
        name: Some(name.to_string()),
    })
    .unwrap()
}

fn employee(
    db: &Database,
    emp_no: &str,
    dept: Option<&str>,
    location_id: Option<i64>,
    salary: Option<i64>,
) -> Employee {
    let mut emp = Employee::new(emp_no);
    emp.name = Some(format!("Employee {}", emp_no));
    emp.dept_code = dept.map(str::to_string);
    emp.location_id = location_id;
    emp.salary = salary.map(Decimal::from);
    db.insert(emp).unwrap()
}

// =============================================================================
// Cumulative Salary (q1)
// =============================================================================

/// Salaries [100, 200, 300] in emp_no order accumulate to [100, 300, 600].
#[test]
fn test_running_sum_within_department() {
    let (_tmp, db) = open_db();
    employee(&db, "E01", Some("ENG"), None, Some(100));
    employee(&db, "E02", Some("ENG"), None, Some(200));
    employee(&db, "E03", Some("ENG"), None, Some(300));

    let rows = cumulative_salary(&db.snapshot().unwrap()).unwrap();
    let sums: Vec<Decimal> = rows.iter().map(|r| r.cumulative_salary).collect();
    assert_eq!(
        sums,
        vec![Decimal::from(100), Decimal::from(300), Decimal::from(600)]
    );
}

/// Insertion order does not matter; emp_no order does.
#[test]
fn test_running_sum_follows_emp_no_not_insert_order() {
    let (_tmp, db) = open_db();
    employee(&db, "E03", Some("ENG"), None, Some(300));
    employee(&db, "E01", Some("ENG"), None, Some(100));
    employee(&db, "E02", Some("ENG"), None, Some(200));

    let rows = cumulative_salary(&db.snapshot().unwrap()).unwrap();
    let order: Vec<&str> = rows.iter().map(|r| r.emp_no.as_str()).collect();
    assert_eq!(order, vec!["E01", "E02", "E03"]);
    assert_eq!(rows[2].cumulative_salary, Decimal::from(600));
}

/// Sums restart per department; the no-department group is kept, and a
/// missing salary adds nothing.
#[test]
fn test_running_sum_resets_per_department() {
    let (_tmp, db) = open_db();
    employee(&db, "E01", Some("ENG"), None, Some(100));
    employee(&db, "E02", Some("OPS"), None, Some(50));
    employee(&db, "E03", None, None, Some(10));
    employee(&db, "E04", None, None, None);

    let rows = cumulative_salary(&db.snapshot().unwrap()).unwrap();
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].dept_code.as_deref(), Some("ENG"));
    assert_eq!(rows[1].dept_code.as_deref(), Some("OPS"));
    assert_eq!(rows[1].cumulative_salary, Decimal::from(50));

    assert_eq!(rows[2].dept_code, None);
    assert_eq!(rows[2].cumulative_salary, Decimal::from(10));
    assert_eq!(rows[3].cumulative_salary, Decimal::from(10));
}

// =============================================================================
// Salary Ranking (q3)
// =============================================================================

/// Two employees at 500 share rank 1 + distinct salaries above 500.
#[test]
fn test_equal_salaries_share_rank() {
    let (_tmp, db) = open_db();
    let hq = location(&db, "HQ", "Head Office");
    department(&db, "ENG", "Engineering");

    employee(&db, "E01", Some("ENG"), Some(hq.id), Some(900));
    employee(&db, "E02", Some("ENG"), Some(hq.id), Some(700));
    employee(&db, "E03", Some("ENG"), Some(hq.id), Some(700));
    employee(&db, "E04", Some("ENG"), Some(hq.id), Some(500));
    employee(&db, "E05", Some("ENG"), Some(hq.id), Some(500));

    let rows = salary_ranking(&db.snapshot().unwrap()).unwrap();
    let at_500: Vec<_> = rows
        .iter()
        .filter(|r| r.salary == Some(Decimal::from(500)))
        .collect();

    assert_eq!(at_500.len(), 2);
    // Distinct salaries above 500: 900 and 700.
    assert!(at_500.iter().all(|r| r.salary_rank == 3));
    assert!(at_500.iter().all(|r| r.salary_gap == Decimal::from(200)));
}

/// The top earner of each group has a zero gap.
#[test]
fn test_top_earner_gap_is_zero() {
    let (_tmp, db) = open_db();
    let hq = location(&db, "HQ", "Head Office");
    let br = location(&db, "BR", "Branch");
    department(&db, "ENG", "Engineering");

    employee(&db, "E01", Some("ENG"), Some(hq.id), Some(900));
    employee(&db, "E02", Some("ENG"), Some(hq.id), Some(400));
    employee(&db, "E03", Some("ENG"), Some(br.id), Some(300));

    let rows = salary_ranking(&db.snapshot().unwrap()).unwrap();
    for top in rows.iter().filter(|r| r.salary_rank == 1) {
        assert_eq!(top.salary_gap, Decimal::ZERO);
    }
    assert_eq!(rows.iter().filter(|r| r.salary_rank == 1).count(), 2);
}

/// No department and no location still yields a row, under UNASSIGNED.
#[test]
fn test_unassigned_employee_is_ranked() {
    let (_tmp, db) = open_db();
    let hq = location(&db, "HQ", "Head Office");
    department(&db, "ENG", "Engineering");
    employee(&db, "E01", Some("ENG"), Some(hq.id), Some(900));
    employee(&db, "E02", None, None, Some(100));

    let rows = salary_ranking(&db.snapshot().unwrap()).unwrap();
    assert_eq!(rows.len(), 2);

    let loose = rows
        .iter()
        .find(|r| r.employee_name.as_deref() == Some("Employee E02"))
        .unwrap();
    assert_eq!(loose.department_name, UNASSIGNED);
    assert_eq!(loose.location_name, UNASSIGNED);
    assert_eq!(loose.salary_rank, 1);
    assert_eq!(loose.salary_gap, Decimal::ZERO);
}

/// Ordering is location name, department name, then salary descending.
#[test]
fn test_ranking_order() {
    let (_tmp, db) = open_db();
    let a = location(&db, "A", "Alpha");
    let b = location(&db, "B", "Beta");
    department(&db, "ENG", "Engineering");
    department(&db, "ADM", "Admin");

    employee(&db, "E01", Some("ENG"), Some(b.id), Some(100));
    employee(&db, "E02", Some("ENG"), Some(a.id), Some(100));
    employee(&db, "E03", Some("ENG"), Some(a.id), Some(300));
    employee(&db, "E04", Some("ADM"), Some(a.id), Some(50));

    let rows = salary_ranking(&db.snapshot().unwrap()).unwrap();
    let seen: Vec<(&str, &str, Option<Decimal>)> = rows
        .iter()
        .map(|r| {
            (
                r.location_name.as_str(),
                r.department_name.as_str(),
                r.salary,
            )
        })
        .collect();

    assert_eq!(
        seen,
        vec![
            ("Alpha", "Admin", Some(Decimal::from(50))),
            ("Alpha", "Engineering", Some(Decimal::from(300))),
            ("Alpha", "Engineering", Some(Decimal::from(100))),
            ("Beta", "Engineering", Some(Decimal::from(100))),
        ]
    );
}

// =============================================================================
// Department by Location (q2)
// =============================================================================

/// Every location row appears exactly once, including empty ones.
#[test]
fn test_every_location_appears_once() {
    let (_tmp, db) = open_db();
    let hq = location(&db, "HQ", "Head Office");
    location(&db, "EMPTY", "Annex");
    department(&db, "ENG", "Engineering");
    employee(&db, "E01", Some("ENG"), Some(hq.id), Some(100));

    let rows = department_by_location(&db.snapshot().unwrap()).unwrap();
    assert_eq!(rows.len(), 2);

    let annex: Vec<_> = rows.iter().filter(|r| r.location_name == "Annex").collect();
    assert_eq!(annex.len(), 1);
    assert_eq!(annex[0].dept_with_most_employees, None);
    assert_eq!(annex[0].dept_employee_count, 0);
    assert_eq!(annex[0].avg_salary_of_lowest_dept, None);

    let head = rows
        .iter()
        .find(|r| r.location_name == "Head Office")
        .unwrap();
    assert_eq!(head.dept_with_most_employees.as_deref(), Some("Engineering"));
    assert_eq!(head.dept_employee_count, 1);
}

/// The average covers the whole location, not the leading department.
#[test]
fn test_average_is_location_wide() {
    let (_tmp, db) = open_db();
    let hq = location(&db, "HQ", "Head Office");
    department(&db, "ENG", "Engineering");
    department(&db, "OPS", "Operations");

    employee(&db, "E01", Some("ENG"), Some(hq.id), Some(100));
    employee(&db, "E02", Some("ENG"), Some(hq.id), Some(200));
    employee(&db, "E03", Some("OPS"), Some(hq.id), Some(1000));

    let rows = department_by_location(&db.snapshot().unwrap()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].dept_with_most_employees.as_deref(), Some("Engineering"));
    assert_eq!(rows[0].dept_employee_count, 2);
    // (100 + 200 + 1000) / 3 = 433.333...
    assert_eq!(
        rows[0].avg_salary_of_lowest_dept,
        Some(Decimal::new(43333, 2))
    );
}

/// Employees without a location land in a trailing UNASSIGNED row.
#[test]
fn test_no_location_bucket() {
    let (_tmp, db) = open_db();
    location(&db, "HQ", "Head Office");
    employee(&db, "E01", None, None, Some(100));

    let rows = department_by_location(&db.snapshot().unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].location_name, UNASSIGNED);
    assert_eq!(rows[1].dept_with_most_employees.as_deref(), Some(UNASSIGNED));
    assert_eq!(rows[1].dept_employee_count, 1);
}

// =============================================================================
// Idempotence
// =============================================================================

/// Repeat runs with no writes in between produce identical output.
#[test]
fn test_reports_are_idempotent() {
    let (_tmp, db) = open_db();
    let hq = location(&db, "HQ", "Head Office");
    department(&db, "ENG", "Engineering");
    employee(&db, "E01", Some("ENG"), Some(hq.id), Some(100));
    employee(&db, "E02", Some("ENG"), Some(hq.id), Some(100));
    employee(&db, "E03", None, None, None);

    for kind in ReportKind::ALL {
        let first = kind.render(&db.snapshot().unwrap()).unwrap();
        for _ in 0..10 {
            let again = kind.render(&db.snapshot().unwrap()).unwrap();
            assert_eq!(first, again, "report {} changed between runs", kind);
        }
    }
}
