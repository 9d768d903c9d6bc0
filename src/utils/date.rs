use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Key used for ledger lookups and stored attendance rows.
pub fn date_key(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// "2026-03-01 ~ 2026-03-07" style label for a date range.
pub fn range_label(dates: &[NaiveDate]) -> String {
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => format!("{} ~ {}", date_key(first), date_key(last)),
        _ => "-".to_string(),
    }
}

pub fn current_year_month() -> (i32, u32) {
    let t = today();
    (t.year(), t.month())
}
