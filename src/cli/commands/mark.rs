use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::mark::MarkLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceStatus;
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config, operator: &str) -> AppResult<()> {
    if let Commands::Mark {
        date: date_str,
        member,
        status,
    } = cmd
    {
        //
        // 1. Parse date (mandatory)
        //
        let d = date::parse_date(date_str)
            .ok_or_else(|| AppError::InvalidDate(date_str.to_string()))?;

        //
        // 2. Parse target status (present/absent only; unset is reached
        //    by selecting the current status again)
        //
        let selected = AttendanceStatus::parse_selectable(status)
            .ok_or_else(|| AppError::InvalidStatus(status.to_string()))?;

        //
        // 3. Apply the toggle against the stored mark
        //
        let mut pool = DbPool::new(&cfg.database)?;
        let (member, result) = MarkLogic::toggle_mark(&mut pool, operator, *member, d, selected)?;

        success(format!(
            "{} on {}: {}",
            member.name,
            d.format("%Y-%m-%d"),
            result.as_str()
        ));
    }

    Ok(())
}
