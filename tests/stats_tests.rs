use chrono::NaiveDate;
use predicates::str::contains;
use std::collections::{HashMap, HashSet};

use rollbook::core::calendar::{WeekSelector, month_dates, week_slice};
use rollbook::core::ledger::{present_on, toggle};
use rollbook::core::stats::{aggregate, attendance_rate, day_stats};
use rollbook::models::attendance::{AttendanceStatus, Ledger};
use rollbook::models::member::Member;

mod common;
use common::{rlb, seed_marks, seed_roster, setup_test_db};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

fn member(id: i64, name: &str, program_id: i64) -> Member {
    Member {
        id,
        name: name.to_string(),
        phone: String::new(),
        program_id,
        program_name: format!("P{}", program_id),
        registered_on: d("2026-03-01"),
    }
}

fn ledger_for(date: &str, marks: &[(i64, AttendanceStatus)]) -> Ledger {
    let mut ledger = Ledger::new();
    let day: HashMap<i64, AttendanceStatus> = marks.iter().copied().collect();
    ledger.insert(d(date), day);
    ledger
}

// ---------------------------
// Calendar
// ---------------------------

#[test]
fn test_month_dates_counts_and_order() {
    let cases = [
        (2026, 1, 31),
        (2026, 2, 28), // non-leap February
        (2024, 2, 29), // leap February
        (2026, 4, 30),
    ];

    for (year, month, expected) in cases {
        let dates = month_dates(year, month).expect("valid month");
        assert_eq!(dates.len(), expected, "{}-{:02}", year, month);

        // strictly ascending, no gaps
        for pair in dates.windows(2) {
            assert_eq!(pair[0].succ_opt().unwrap(), pair[1]);
        }
    }
}

#[test]
fn test_month_dates_rejects_invalid_month() {
    assert!(month_dates(2026, 13).is_err());
    assert!(month_dates(2026, 0).is_err());
}

#[test]
fn test_week_slice_four_always_reaches_month_end() {
    for (year, month) in [(2026, 2), (2024, 2), (2026, 4), (2026, 3)] {
        let all = month_dates(year, month).expect("valid month");
        let last_week = week_slice(year, month, WeekSelector::Week(4)).expect("week 4");

        assert_eq!(last_week.first(), all.get(21));
        assert_eq!(last_week.last(), all.last());
    }
}

#[test]
fn test_week_slice_fixed_bounds() {
    let week1 = week_slice(2026, 3, WeekSelector::Week(1)).expect("week 1");
    assert_eq!(week1.len(), 7);
    assert_eq!(week1[0], d("2026-03-01"));
    assert_eq!(week1[6], d("2026-03-07"));

    let week3 = week_slice(2026, 3, WeekSelector::Week(3)).expect("week 3");
    assert_eq!(week3[0], d("2026-03-15"));
    assert_eq!(week3[6], d("2026-03-21"));

    let all = week_slice(2026, 3, WeekSelector::All).expect("all");
    assert_eq!(all, month_dates(2026, 3).expect("month"));
}

#[test]
fn test_week_selector_parsing() {
    assert_eq!("all".parse::<WeekSelector>().unwrap(), WeekSelector::All);
    assert_eq!("2".parse::<WeekSelector>().unwrap(), WeekSelector::Week(2));
    assert!("5".parse::<WeekSelector>().is_err());
    assert!("week".parse::<WeekSelector>().is_err());
}

// ---------------------------
// Ledger reader + toggle
// ---------------------------

#[test]
fn test_present_on_respects_eligibility_and_status() {
    let ledger = ledger_for(
        "2026-03-02",
        &[
            (1, AttendanceStatus::Present),
            (2, AttendanceStatus::Absent),
            (3, AttendanceStatus::Present),
        ],
    );

    // Member 3 is present but not eligible (filtered out by program)
    let eligible: HashSet<i64> = [1, 2].into_iter().collect();
    let present = present_on(d("2026-03-02"), &ledger, &eligible);

    assert_eq!(present, [1].into_iter().collect());

    // A date with no entries yields the empty set
    assert!(present_on(d("2026-03-03"), &ledger, &eligible).is_empty());
}

#[test]
fn test_toggle_rule() {
    use AttendanceStatus::{Absent, Present, Unset};

    // repeat-select reverts to unset
    assert_eq!(toggle(Present, Present), Unset);
    assert_eq!(toggle(Absent, Absent), Unset);

    // a different selection always wins
    assert_eq!(toggle(Unset, Present), Present);
    assert_eq!(toggle(Present, Absent), Absent);
    assert_eq!(toggle(Absent, Present), Present);
}

// ---------------------------
// Period aggregation
// ---------------------------

#[test]
fn test_aggregate_single_day_scenario() {
    let members = [member(1, "A", 1), member(2, "B", 1), member(3, "C", 2)];
    let ledger = ledger_for(
        "2026-03-02",
        &[(1, AttendanceStatus::Present), (2, AttendanceStatus::Absent)],
    );

    let stats = aggregate(&[d("2026-03-02")], &members, &ledger);

    assert_eq!(stats.unique_attendees, 1);
    assert_eq!(stats.cumulative_attendance, 1);
    assert_eq!(stats.active_days, 1);
    assert_eq!(stats.registered, 3);
    assert_eq!(attendance_rate(&stats), 33);
}

#[test]
fn test_aggregate_is_idempotent() {
    let members = [member(1, "A", 1), member(2, "B", 1)];
    let ledger = ledger_for(
        "2026-03-02",
        &[(1, AttendanceStatus::Present), (2, AttendanceStatus::Present)],
    );
    let dates = month_dates(2026, 3).expect("month");

    let first = aggregate(&dates, &members, &ledger);
    let second = aggregate(&dates, &members, &ledger);

    assert_eq!(first, second);
}

#[test]
fn test_aggregate_empty_ledger_is_all_zero() {
    let members = [member(1, "A", 1), member(2, "B", 1)];
    let ledger = Ledger::new();
    let dates = month_dates(2026, 3).expect("month");

    let stats = aggregate(&dates, &members, &ledger);

    assert_eq!(stats.unique_attendees, 0);
    assert_eq!(stats.cumulative_attendance, 0);
    assert_eq!(stats.active_days, 0);
    assert_eq!(stats.registered, 2);
    assert_eq!(attendance_rate(&stats), 0);
}

#[test]
fn test_unique_never_exceeds_cumulative() {
    let members = [member(1, "A", 1), member(2, "B", 1)];

    // Member 1 attends three days, member 2 one day
    let mut ledger = Ledger::new();
    for date in ["2026-03-02", "2026-03-03", "2026-03-04"] {
        ledger
            .entry(d(date))
            .or_default()
            .insert(1, AttendanceStatus::Present);
    }
    ledger
        .entry(d("2026-03-03"))
        .or_default()
        .insert(2, AttendanceStatus::Present);

    let dates = month_dates(2026, 3).expect("month");
    let stats = aggregate(&dates, &members, &ledger);

    assert_eq!(stats.unique_attendees, 2);
    assert_eq!(stats.cumulative_attendance, 4);
    assert_eq!(stats.active_days, 3);
    assert!(stats.unique_attendees <= stats.cumulative_attendance);
}

#[test]
fn test_attendance_rate_never_divides_by_zero() {
    use rollbook::core::stats::PeriodStats;

    let no_members = PeriodStats {
        unique_attendees: 0,
        cumulative_attendance: 0,
        active_days: 5,
        registered: 0,
    };
    assert_eq!(attendance_rate(&no_members), 0);

    let no_active_days = PeriodStats {
        unique_attendees: 0,
        cumulative_attendance: 0,
        active_days: 0,
        registered: 10,
    };
    assert_eq!(attendance_rate(&no_active_days), 0);
}

// ---------------------------
// Daily sheet summary
// ---------------------------

#[test]
fn test_day_stats_counts_and_rate() {
    let members = [member(1, "A", 1), member(2, "B", 1), member(3, "C", 2)];
    let day: HashMap<i64, AttendanceStatus> = [
        (1, AttendanceStatus::Present),
        (2, AttendanceStatus::Absent),
    ]
    .into_iter()
    .collect();

    let stats = day_stats(&members, &day);

    assert_eq!(stats.total, 3);
    assert_eq!(stats.present, 1);
    assert_eq!(stats.absent, 1);
    assert_eq!(stats.unset, 1);
    assert_eq!(stats.rate, 33);
}

#[test]
fn test_day_stats_empty_roster() {
    let day = HashMap::new();
    let stats = day_stats(&[], &day);

    assert_eq!(stats.total, 0);
    assert_eq!(stats.rate, 0);
}

// ---------------------------
// CLI stats view
// ---------------------------

#[test]
fn test_stats_command_reports_period_numbers() {
    let db_path = setup_test_db("stats_command");
    seed_roster(&db_path);
    seed_marks(&db_path);

    rlb()
        .args(["--db", &db_path, "stats", "--year", "2026", "--month", "3"])
        .assert()
        .success()
        .stdout(contains("Registered members    : 3"))
        .stdout(contains("Active days           : 1"))
        .stdout(contains("33%"));
}

#[test]
fn test_stats_command_program_filter() {
    let db_path = setup_test_db("stats_program_filter");
    seed_roster(&db_path);
    seed_marks(&db_path);

    // Painting has no marks: everything zero, but the breakdown still
    // lists both programs
    rlb()
        .args([
            "--db", &db_path, "stats", "--year", "2026", "--month", "3", "--program", "2",
        ])
        .assert()
        .success()
        .stdout(contains("Painting"))
        .stdout(contains("Registered members    : 1"))
        .stdout(contains("Yoga"));
}

#[test]
fn test_stats_command_week_slice() {
    let db_path = setup_test_db("stats_week_slice");
    seed_roster(&db_path);
    seed_marks(&db_path);

    // 2026-03-02 falls in week 1 (days 1-7)
    rlb()
        .args([
            "--db", &db_path, "stats", "--year", "2026", "--month", "3", "--week", "1",
        ])
        .assert()
        .success()
        .stdout(contains("2026-03-01 ~ 2026-03-07"));

    // ...and not in week 4
    rlb()
        .args([
            "--db", &db_path, "stats", "--year", "2026", "--month", "3", "--week", "4",
        ])
        .assert()
        .success()
        .stdout(contains("2026-03-22 ~ 2026-03-31"));
}
