//! Import Pipeline Tests
//!
//! Sheet directory -> database -> reports:
//! - All four sheets load in one run
//! - Re-running the import is stable
//! - Loose cells become null instead of failing the sheet

use std::fs;
use std::path::Path;

use orgstat::importer::Importer;
use orgstat::model::{Employee, Location, Tier};
use orgstat::report::{department_by_location, salary_ranking, UNASSIGNED};
use orgstat::store::Database;
use rust_decimal::Decimal;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_sheets(dir: &Path) {
    fs::write(
        dir.join("location.csv"),
        "code,name\nHQ,Head Office\nBR,Branch\n",
    )
    .unwrap();
    fs::write(
        dir.join("department.csv"),
        "code,name\nENG,Engineering\nOPS,Operations\n",
    )
    .unwrap();
    fs::write(dir.join("tier.csv"), "code,name\nT1,Junior\nT2,Senior\n,\n").unwrap();
    fs::write(
        dir.join("employee.csv"),
        "emp_no,name,dept_code,location,position,salary\n\
         E01,Ada,ENG,HQ,Engineer,\"1,200\"\n\
         E02,Grace,ENG,HQ,Engineer,900\n\
         E03,Linus,OPS,BR,Operator,oops\n\
         ,Nobody,ENG,HQ,Ghost,1\n\
         E04,Ken,,,,500\n",
    )
    .unwrap();
}

fn setup() -> (TempDir, Database) {
    let tmp = TempDir::new().unwrap();
    let sheets = tmp.path().join("sheets");
    fs::create_dir(&sheets).unwrap();
    write_sheets(&sheets);

    let db = Database::open(&tmp.path().join("org.db")).unwrap();
    (tmp, db)
}

// =============================================================================
// Import Tests
// =============================================================================

#[test]
fn test_full_import() {
    let (tmp, db) = setup();
    let summary = Importer::new(db.clone()).run(&tmp.path().join("sheets"));

    assert_eq!(summary.locations.inserted, 2);
    assert_eq!(summary.departments.inserted, 2);
    assert_eq!(summary.tiers.inserted, 2);
    assert_eq!(summary.tiers.skipped, 1);
    assert_eq!(summary.employees.inserted, 4);
    assert_eq!(summary.employees.skipped, 1);

    assert_eq!(db.list::<Tier>().unwrap().len(), 2);

    let ada: Employee = db.find_by("emp_no", "E01").unwrap().unwrap();
    assert_eq!(ada.salary, Some(Decimal::from(1200)));

    let hq: Location = db.find_by("code", "HQ").unwrap().unwrap();
    assert_eq!(ada.location_id, Some(hq.id));

    let linus: Employee = db.find_by("emp_no", "E03").unwrap().unwrap();
    assert_eq!(linus.salary, None);

    let ken: Employee = db.find_by("emp_no", "E04").unwrap().unwrap();
    assert_eq!(ken.dept_code, None);
    assert_eq!(ken.location_id, None);
}

#[test]
fn test_reimport_is_stable() {
    let (tmp, db) = setup();
    let importer = Importer::new(db.clone());
    importer.run(&tmp.path().join("sheets"));

    let before = db.snapshot().unwrap();
    let second = importer.run(&tmp.path().join("sheets"));
    let after = db.snapshot().unwrap();

    assert_eq!(second.employees.inserted, 0);
    assert_eq!(second.employees.updated, 4);
    assert_eq!(before.employees, after.employees);
    assert_eq!(before.locations, after.locations);
}

#[test]
fn test_reports_over_imported_data() {
    let (tmp, db) = setup();
    Importer::new(db.clone()).run(&tmp.path().join("sheets"));
    let snapshot = db.snapshot().unwrap();

    let q2 = department_by_location(&snapshot).unwrap();
    let names: Vec<&str> = q2.iter().map(|r| r.location_name.as_str()).collect();
    assert_eq!(names, vec!["Branch", "Head Office", UNASSIGNED]);

    let hq = &q2[1];
    assert_eq!(hq.dept_with_most_employees.as_deref(), Some("Engineering"));
    assert_eq!(hq.dept_employee_count, 2);
    assert_eq!(hq.avg_salary_of_lowest_dept, Some(Decimal::from(1050)));

    let q3 = salary_ranking(&snapshot).unwrap();
    assert_eq!(q3.len(), 4);
    let grace = q3
        .iter()
        .find(|r| r.employee_name.as_deref() == Some("Grace"))
        .unwrap();
    assert_eq!(grace.salary_rank, 2);
    assert_eq!(grace.salary_gap, Decimal::from(300));
}

#[test]
fn test_bad_sheet_does_not_stop_the_rest() {
    let (tmp, db) = setup();
    let sheets = tmp.path().join("sheets");
    // Invalid UTF-8 fails to read; the remaining sheets still import.
    fs::write(sheets.join("tier.csv"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let summary = Importer::new(db.clone()).run(&sheets);
    assert_eq!(summary.tiers.applied(), 0);
    assert_eq!(summary.employees.inserted, 4);
    assert!(db.list::<Tier>().unwrap().is_empty());
}
