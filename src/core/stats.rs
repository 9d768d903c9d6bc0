//! Attendance statistics over in-memory snapshots.
//!
//! All functions here are pure and total: empty inputs produce zero-valued
//! results, never an error.

use crate::core::ledger::present_on;
use crate::models::attendance::{DayRecord, Ledger};
use crate::models::member::Member;
use crate::models::program::Program;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// Summary counts for a date range.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PeriodStats {
    /// Distinct members present at least once in range.
    pub unique_attendees: usize,
    /// Sum of daily present-counts (repeat attendees count once per day).
    pub cumulative_attendance: usize,
    /// Days with at least one member marked present.
    pub active_days: usize,
    /// Member count at call time, not historical.
    pub registered: usize,
}

/// Aggregate a date range against the ledger, restricted to `members`.
/// A day with zero attendance does not count as held.
pub fn aggregate(dates: &[NaiveDate], members: &[Member], ledger: &Ledger) -> PeriodStats {
    let eligible: HashSet<i64> = members.iter().map(|m| m.id).collect();

    let mut unique: HashSet<i64> = HashSet::new();
    let mut cumulative = 0usize;
    let mut active_days = 0usize;

    for date in dates {
        let present = present_on(*date, ledger, &eligible);
        if !present.is_empty() {
            active_days += 1;
            cumulative += present.len();
            unique.extend(present);
        }
    }

    PeriodStats {
        unique_attendees: unique.len(),
        cumulative_attendance: cumulative,
        active_days,
        registered: members.len(),
    }
}

/// Attendance rate in percent: cumulative / (registered * active days).
/// Zero when either denominator factor is zero; the formula does not
/// account for mid-period enrollment.
pub fn attendance_rate(stats: &PeriodStats) -> u32 {
    if stats.registered == 0 || stats.active_days == 0 {
        return 0;
    }

    let denom = (stats.registered * stats.active_days) as f64;
    ((stats.cumulative_attendance as f64 / denom) * 100.0).round() as u32
}

/// Summary of a single day's sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub unset: usize,
    pub rate: u32,
}

/// Per-day counts for the daily sheet view.
pub fn day_stats(members: &[Member], day: &DayRecord) -> DayStats {
    let present = members
        .iter()
        .filter(|m| day.get(&m.id).is_some_and(|s| s.is_present()))
        .count();
    let absent = members
        .iter()
        .filter(|m| day.get(&m.id).is_some_and(|s| s.is_absent()))
        .count();
    let total = members.len();
    let unset = total - present - absent;

    let rate = if total > 0 {
        ((present as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    DayStats {
        total,
        present,
        absent,
        unset,
        rate,
    }
}

/// Monthly stats broken down per program (every program, regardless of the
/// active filter).
#[derive(Debug, Clone)]
pub struct ProgramStats {
    pub program: Program,
    pub stats: PeriodStats,
    pub rate: u32,
}

pub fn per_program(
    programs: &[Program],
    members: &[Member],
    dates: &[NaiveDate],
    ledger: &Ledger,
) -> Vec<ProgramStats> {
    programs
        .iter()
        .map(|p| {
            let scoped: Vec<Member> = members
                .iter()
                .filter(|m| m.program_id == p.id)
                .cloned()
                .collect();
            let stats = aggregate(dates, &scoped, ledger);

            ProgramStats {
                program: p.clone(),
                rate: attendance_rate(&stats),
                stats,
            }
        })
        .collect()
}
