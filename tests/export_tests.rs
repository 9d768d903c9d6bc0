use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;

use rollbook::export::matrix::{self, LEADING_COLUMNS, TRAILING_COLUMNS};
use rollbook::models::attendance::{AttendanceStatus, Ledger};
use rollbook::models::member::Member;

mod common;
use common::{rlb, seed_marks, seed_roster, setup_test_db, temp_out};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

fn member(id: i64, name: &str, phone: &str, program_name: &str) -> Member {
    Member {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        program_id: 1,
        program_name: program_name.to_string(),
        registered_on: d("2026-03-01"),
    }
}

// ---------------------------
// Matrix shape
// ---------------------------

#[test]
fn test_matrix_shape_two_members_two_dates() {
    let members = [
        member(1, "Ada", "010-1111-2222", "Yoga"),
        member(2, "Grace", "", "Yoga"),
    ];

    let mut ledger = Ledger::new();
    let day: HashMap<i64, AttendanceStatus> = [
        (1, AttendanceStatus::Present),
        (2, AttendanceStatus::Absent),
    ]
    .into_iter()
    .collect();
    ledger.insert(d("2026-03-02"), day);

    let dates = [d("2026-03-02"), d("2026-03-03")];
    let sheet = matrix::build(2026, 3, &dates, &members, &ledger, "Yoga", "O", "X");

    // 4 fixed leading columns + one per date + 2 totals columns
    assert_eq!(
        sheet.headers.len(),
        LEADING_COLUMNS + dates.len() + TRAILING_COLUMNS
    );
    assert_eq!(sheet.headers[..4], ["no", "name", "phone", "program"]);
    assert_eq!(sheet.headers[4], "2");
    assert_eq!(sheet.headers[5], "3");

    assert_eq!(sheet.rows.len(), 2);

    // Ada: present once, marker in the first date column, empty in the second
    assert_eq!(
        sheet.rows[0],
        ["1", "Ada", "010-1111-2222", "Yoga", "O", "", "1", "0"]
    );

    // Grace: absent once, no phone → placeholder
    assert_eq!(sheet.rows[1], ["2", "Grace", "-", "Yoga", "X", "", "0", "1"]);
}

#[test]
fn test_matrix_preserves_member_order() {
    let members = [
        member(9, "Zoe", "", "Yoga"),
        member(1, "Ada", "", "Yoga"),
    ];
    let ledger = Ledger::new();
    let dates = [d("2026-03-02")];

    let sheet = matrix::build(2026, 3, &dates, &members, &ledger, "Yoga", "O", "X");

    // Rows keep the input order, they are never re-sorted
    assert_eq!(sheet.rows[0][1], "Zoe");
    assert_eq!(sheet.rows[1][1], "Ada");
}

// ---------------------------
// CSV rendering
// ---------------------------

#[test]
fn test_export_csv_layout_and_quoting() {
    let db_path = setup_test_db("export_csv_layout");
    seed_roster(&db_path);
    seed_marks(&db_path);

    let out = temp_out("export_csv_layout", "csv");

    rlb()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--year", "2026",
            "--month", "3", "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");

    // Byte-order mark so spreadsheet tools detect UTF-8
    assert!(content.starts_with('\u{feff}'));

    let body = content.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = body.lines().collect();

    assert_eq!(lines[0], "\"Attendance sheet 2026-03\"");
    assert_eq!(lines[1], "\"Program: All programs\"");
    assert_eq!(lines[2], "");

    // Header: 4 fixed + 31 March days + 2 totals = 37 quoted fields
    let header_fields = lines[3].split(',').count();
    assert_eq!(header_fields, 37);
    assert!(lines[3].starts_with("\"no\",\"name\",\"phone\",\"program\",\"1\","));
    assert!(lines[3].ends_with("\"present days\",\"absent days\""));

    // Every cell is quote-wrapped
    assert!(lines[3].split(',').all(|f| f.starts_with('"') && f.ends_with('"')));

    // Ada present once, Grace absent once, Alan unmarked
    let ada = lines[4];
    assert!(ada.starts_with("\"1\",\"Ada\",\"010-1111-2222\",\"Yoga\""));
    assert!(ada.ends_with("\"1\",\"0\""));

    let grace = lines[5];
    assert!(grace.starts_with("\"2\",\"Grace\",\"-\",\"Yoga\""));
    assert!(grace.ends_with("\"0\",\"1\""));

    let alan = lines[6];
    assert!(alan.ends_with("\"0\",\"0\""));
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_export_csv_program_filter_restricts_rows() {
    let db_path = setup_test_db("export_csv_filter");
    seed_roster(&db_path);
    seed_marks(&db_path);

    let out = temp_out("export_csv_filter", "csv");

    rlb()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--year", "2026",
            "--month", "3", "--program", "1", "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");

    assert!(content.contains("\"Program: Yoga\""));
    assert!(content.contains("\"Ada\""));
    assert!(!content.contains("\"Alan\""));
}

#[test]
fn test_export_csv_doubles_embedded_quotes() {
    let db_path = setup_test_db("export_csv_quotes");

    rlb()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rlb()
        .args(["--db", &db_path, "program", "add", "Book \"Club\""])
        .assert()
        .success();

    rlb()
        .args([
            "--db", &db_path, "member", "add", "Ada", "--program", "1", "--date", "2026-03-01",
        ])
        .assert()
        .success();

    let out = temp_out("export_csv_quotes", "csv");

    rlb()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--year", "2026",
            "--month", "3", "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("\"Book \"\"Club\"\"\""));
}

// ---------------------------
// JSON / XLSX rendering
// ---------------------------

#[test]
fn test_export_json_structure() {
    let db_path = setup_test_db("export_json");
    seed_roster(&db_path);
    seed_marks(&db_path);

    let out = temp_out("export_json", "json");

    rlb()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--year", "2026",
            "--month", "3", "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");

    assert_eq!(value["title"], "Attendance sheet 2026-03");
    assert_eq!(value["headers"].as_array().map(|a| a.len()), Some(37));
    assert_eq!(value["rows"].as_array().map(|a| a.len()), Some(3));
    assert_eq!(value["rows"][0][1], "Ada");
}

#[test]
fn test_export_xlsx_writes_file() {
    let db_path = setup_test_db("export_xlsx");
    seed_roster(&db_path);
    seed_marks(&db_path);

    let out = temp_out("export_xlsx", "xlsx");

    rlb()
        .args([
            "--db", &db_path, "export", "--format", "xlsx", "--file", &out, "--year", "2026",
            "--month", "3", "--force",
        ])
        .assert()
        .success();

    let meta = fs::metadata(&out).expect("exported xlsx exists");
    assert!(meta.len() > 0);
}

// ---------------------------
// Guard rails
// ---------------------------

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    seed_roster(&db_path);

    rlb()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", "relative.csv", "--year",
            "2026", "--month", "3", "--force",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("must be absolute"));
}

#[test]
fn test_export_empty_roster_is_a_noop() {
    let db_path = setup_test_db("export_empty_roster");

    rlb()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let out = temp_out("export_empty_roster", "csv");

    rlb()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--year", "2026",
            "--month", "3", "--force",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("No members found"));

    assert!(!std::path::Path::new(&out).exists());
}
