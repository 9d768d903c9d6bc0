use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::day_stats;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceStatus;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, operator: &str) -> AppResult<()> {
    if let Commands::Sheet { date: date_str } = cmd {
        let d = match date_str {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let members = queries::load_members(&mut pool, operator)?;

        if members.is_empty() {
            info(format!("No members registered for '{}'.", operator));
            return Ok(());
        }

        let ledger = queries::load_ledger(&mut pool, operator)?;
        let day = ledger.get(&d).cloned().unwrap_or_default();

        header(format!("Attendance sheet {} · {}", d.format("%Y-%m-%d"), operator));
        println!();

        let rows = members
            .iter()
            .map(|m| {
                let status = day.get(&m.id).copied().unwrap_or(AttendanceStatus::Unset);
                let cell = match status {
                    AttendanceStatus::Present => cfg.present_marker.clone(),
                    AttendanceStatus::Absent => cfg.absent_marker.clone(),
                    AttendanceStatus::Unset => "·".to_string(),
                };

                vec![
                    m.id.to_string(),
                    m.name.clone(),
                    m.program_name.clone(),
                    format!("{}{}{}", color_for_status(status), cell, RESET),
                ]
            })
            .collect();

        let table = Table::auto(&["id", "name", "program", "mark"], rows);
        print!("{}", table.render());

        let stats = day_stats(&members, &day);
        println!(
            "\nPresent {} | Absent {} | Unset {} | Rate {}% ({} members)",
            stats.present, stats.absent, stats.unset, stats.rate, stats.total
        );
    }

    Ok(())
}
