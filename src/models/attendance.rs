use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Per-member, per-day attendance mark.
/// Unset is the default state and is never stored in the database:
/// only present/absent rows are materialized.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Unset,
}

impl AttendanceStatus {
    /// Parse user input from the CLI. Unset is not a selectable target,
    /// it is only reached by toggling.
    pub fn parse_selectable(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "present" | "p" => Some(Self::Present),
            "absent" | "a" => Some(Self::Absent),
            _ => None,
        }
    }

    /// Convert DB string → enum. Unset has no stored representation.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }

    /// Convert enum → DB string. None means "delete the row".
    pub fn to_db_str(&self) -> Option<&'static str> {
        match self {
            AttendanceStatus::Present => Some("present"),
            AttendanceStatus::Absent => Some("absent"),
            AttendanceStatus::Unset => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Unset => "unset",
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AttendanceStatus::Absent)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, AttendanceStatus::Unset)
    }
}

/// Marks of a single day, keyed by member id.
pub type DayRecord = HashMap<i64, AttendanceStatus>;

/// Sparse attendance ledger: date → member id → mark.
/// Dates and members without a mark simply have no entry.
pub type Ledger = HashMap<NaiveDate, DayRecord>;
