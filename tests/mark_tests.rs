use predicates::str::contains;

mod common;
use common::{rlb, seed_roster, setup_test_db};

#[test]
fn test_mark_sets_and_double_toggle_reverts_to_unset() {
    let db_path = setup_test_db("mark_double_toggle");
    seed_roster(&db_path);

    rlb()
        .args(["--db", &db_path, "mark", "2026-03-02", "1", "present"])
        .assert()
        .success()
        .stdout(contains("present"));

    // Selecting the same status again reverts the mark to unset
    rlb()
        .args(["--db", &db_path, "mark", "2026-03-02", "1", "present"])
        .assert()
        .success()
        .stdout(contains("unset"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM attendance WHERE member_id = 1 AND date = '2026-03-02'",
            [],
            |row| row.get(0),
        )
        .expect("count marks");
    assert_eq!(rows, 0);
}

#[test]
fn test_mark_switch_status_updates_in_place() {
    let db_path = setup_test_db("mark_switch");
    seed_roster(&db_path);

    rlb()
        .args(["--db", &db_path, "mark", "2026-03-02", "1", "present"])
        .assert()
        .success();

    // Selecting the other status replaces the stored mark
    rlb()
        .args(["--db", &db_path, "mark", "2026-03-02", "1", "absent"])
        .assert()
        .success()
        .stdout(contains("absent"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let (rows, status): (i64, String) = conn
        .query_row(
            "SELECT COUNT(*), MAX(status) FROM attendance WHERE member_id = 1 AND date = '2026-03-02'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("mark row");
    assert_eq!(rows, 1);
    assert_eq!(status, "absent");
}

#[test]
fn test_mark_unknown_member_rejected() {
    let db_path = setup_test_db("mark_unknown_member");
    seed_roster(&db_path);

    rlb()
        .args(["--db", &db_path, "mark", "2026-03-02", "99", "present"])
        .assert()
        .failure()
        .stderr(contains("Member not found"));
}

#[test]
fn test_mark_invalid_inputs_rejected() {
    let db_path = setup_test_db("mark_invalid_inputs");
    seed_roster(&db_path);

    rlb()
        .args(["--db", &db_path, "mark", "2026-13-40", "1", "present"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rlb()
        .args(["--db", &db_path, "mark", "2026-03-02", "1", "late"])
        .assert()
        .failure()
        .stderr(contains("Invalid attendance status"));
}

#[test]
fn test_sheet_shows_day_summary() {
    let db_path = setup_test_db("sheet_summary");
    seed_roster(&db_path);

    rlb()
        .args(["--db", &db_path, "mark", "2026-03-02", "1", "present"])
        .assert()
        .success();

    rlb()
        .args(["--db", &db_path, "mark", "2026-03-02", "2", "absent"])
        .assert()
        .success();

    rlb()
        .args(["--db", &db_path, "sheet", "2026-03-02"])
        .assert()
        .success()
        .stdout(contains("Ada"))
        .stdout(contains("Present 1 | Absent 1 | Unset 1 | Rate 33% (3 members)"));
}
