//! Sparse ledger reader and the mark toggle rule.

use crate::models::attendance::{AttendanceStatus, Ledger};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Members marked present on `date`, restricted to `eligible`.
/// Members with no entry for the date are unset, not absent, and are
/// excluded either way.
pub fn present_on(date: NaiveDate, ledger: &Ledger, eligible: &HashSet<i64>) -> HashSet<i64> {
    match ledger.get(&date) {
        Some(day) => day
            .iter()
            .filter(|(id, status)| status.is_present() && eligible.contains(*id))
            .map(|(id, _)| *id)
            .collect(),
        None => HashSet::new(),
    }
}

/// Toggle rule: selecting the current status again reverts the mark to
/// unset; selecting anything else makes the new status win. There is no
/// special present→absent transition.
pub fn toggle(current: AttendanceStatus, selected: AttendanceStatus) -> AttendanceStatus {
    if current == selected {
        AttendanceStatus::Unset
    } else {
        selected
    }
}
