//! Month and week date-range construction for sheets, stats and exports.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

/// Week filter over a month: the whole month, or one of the four fixed
/// slices (days 1-7, 8-14, 15-21, 22-end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekSelector {
    All,
    Week(u8),
}

impl FromStr for WeekSelector {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "1" => Ok(Self::Week(1)),
            "2" => Ok(Self::Week(2)),
            "3" => Ok(Self::Week(3)),
            "4" => Ok(Self::Week(4)),
            other => Err(AppError::InvalidWeek(other.to_string())),
        }
    }
}

impl WeekSelector {
    pub fn label(&self) -> String {
        match self {
            WeekSelector::All => "all".to_string(),
            WeekSelector::Week(n) => format!("week {}", n),
        }
    }
}

/// Every day of the given month, ascending. The day count comes from the
/// calendar itself, so 28/29/30/31-day months and leap years are covered.
pub fn month_dates(year: i32, month: u32) -> AppResult<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidMonth(format!("{year}-{month:02}")))?;

    let mut out = Vec::new();
    let mut d = first;

    while d.month() == month {
        out.push(d);
        d = match d.succ_opt() {
            Some(next) => next,
            None => break, // end of the calendar
        };
    }

    Ok(out)
}

/// Slice a month into the selected week range. Slice 4 always runs to the
/// last day of the month, whatever its length.
pub fn week_slice(year: i32, month: u32, week: WeekSelector) -> AppResult<Vec<NaiveDate>> {
    let all = month_dates(year, month)?;

    let (start, end) = match week {
        WeekSelector::All => (0, all.len()),
        WeekSelector::Week(n) => {
            let n = (n as usize).clamp(1, 4);
            let start = (n - 1) * 7;
            let end = if n == 4 { all.len() } else { n * 7 };
            (start, end.min(all.len()))
        }
    };

    Ok(all[start..end].to_vec())
}
