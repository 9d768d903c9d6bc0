use crate::models::attendance::AttendanceStatus;

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Status color for sheet rendering:
/// present → green, absent → red, unset → grey.
pub fn color_for_status(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => GREEN,
        AttendanceStatus::Absent => RED,
        AttendanceStatus::Unset => GREY,
    }
}

/// Rate color thresholds used by the stats view:
/// \>= 80 → green, >= 50 → yellow, below → red.
pub fn color_for_rate(rate: u32) -> &'static str {
    if rate >= 80 {
        GREEN
    } else if rate >= 50 {
        YELLOW
    } else {
        RED
    }
}
