//! Per-member, per-day attendance matrix used by every export renderer.

use crate::models::attendance::{AttendanceStatus, Ledger};
use crate::models::member::Member;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Fixed columns before the per-date block.
pub const LEADING_COLUMNS: usize = 4;
/// Totals columns after the per-date block.
pub const TRAILING_COLUMNS: usize = 2;

/// A fully rendered sheet: title and filter lines, one header row, one row
/// per member. Cells are already stringified; renderers only lay them out.
#[derive(Debug, Clone, Serialize)]
pub struct SheetMatrix {
    pub title: String,
    pub filter_label: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn mark_for(ledger: &Ledger, date: &NaiveDate, member_id: i64) -> AttendanceStatus {
    ledger
        .get(date)
        .and_then(|day| day.get(&member_id))
        .copied()
        .unwrap_or(AttendanceStatus::Unset)
}

/// Build the matrix for a date range.
///
/// Members keep their input order; date columns are labeled with the
/// day-of-month. Each row ends with the member's present/absent day counts.
pub fn build(
    year: i32,
    month: u32,
    dates: &[NaiveDate],
    members: &[Member],
    ledger: &Ledger,
    program_label: &str,
    present_marker: &str,
    absent_marker: &str,
) -> SheetMatrix {
    let mut headers: Vec<String> = vec![
        "no".to_string(),
        "name".to_string(),
        "phone".to_string(),
        "program".to_string(),
    ];
    headers.extend(dates.iter().map(|d| d.day().to_string()));
    headers.push("present days".to_string());
    headers.push("absent days".to_string());

    let rows = members
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let mut present_days = 0usize;
            let mut absent_days = 0usize;

            let cells: Vec<String> = dates
                .iter()
                .map(|date| match mark_for(ledger, date, m.id) {
                    AttendanceStatus::Present => {
                        present_days += 1;
                        present_marker.to_string()
                    }
                    AttendanceStatus::Absent => {
                        absent_days += 1;
                        absent_marker.to_string()
                    }
                    AttendanceStatus::Unset => String::new(),
                })
                .collect();

            let mut row = vec![
                (i + 1).to_string(),
                m.name.clone(),
                m.phone_or_placeholder().to_string(),
                m.program_name.clone(),
            ];
            row.extend(cells);
            row.push(present_days.to_string());
            row.push(absent_days.to_string());
            row
        })
        .collect();

    SheetMatrix {
        title: format!("Attendance sheet {year}-{month:02}"),
        filter_label: format!("Program: {program_label}"),
        headers,
        rows,
    }
}
