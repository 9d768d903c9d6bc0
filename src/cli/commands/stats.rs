use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::{WeekSelector, month_dates, week_slice};
use crate::core::stats::{aggregate, attendance_rate, per_program};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_rate};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, operator: &str) -> AppResult<()> {
    if let Commands::Stats {
        year,
        month,
        week,
        program,
    } = cmd
    {
        let (current_year, current_month) = date::current_year_month();
        let year = year.unwrap_or(current_year);
        let month = month.unwrap_or(current_month);

        let mut pool = DbPool::new(&cfg.database)?;

        let programs = queries::load_programs(&mut pool, operator)?;
        let members = queries::load_members(&mut pool, operator)?;

        //
        // Program filter scopes the headline numbers; the per-program
        // breakdown below always covers every program.
        //
        let (target_members, program_label) = match program {
            None => (members.clone(), "All programs".to_string()),
            Some(id) => {
                let p = queries::find_program(&pool.conn, operator, *id)?
                    .ok_or(AppError::ProgramNotFound(*id))?;
                (
                    members
                        .iter()
                        .filter(|m| m.program_id == *id)
                        .cloned()
                        .collect(),
                    p.name,
                )
            }
        };

        let ledger = queries::load_ledger(&mut pool, operator)?;

        let all_dates = month_dates(year, month)?;
        let week_dates = week_slice(year, month, *week)?;

        let week_stats = aggregate(&week_dates, &target_members, &ledger);
        let month_stats = aggregate(&all_dates, &target_members, &ledger);
        let rate = attendance_rate(&month_stats);

        header(format!(
            "Attendance stats {}-{:02} · {}",
            year, month, program_label
        ));
        println!();
        println!(
            "Week slice: {} ({})",
            week.label(),
            date::range_label(&week_dates)
        );
        println!("  Unique attendees      : {}", week_stats.unique_attendees);
        println!(
            "  Cumulative attendance : {}",
            week_stats.cumulative_attendance
        );
        println!("  Active days           : {}", week_stats.active_days);
        println!();
        println!("Month: {}", date::range_label(&all_dates));
        println!("  Unique attendees      : {}", month_stats.unique_attendees);
        println!(
            "  Cumulative attendance : {}",
            month_stats.cumulative_attendance
        );
        println!("  Active days           : {}", month_stats.active_days);
        println!("  Registered members    : {}", month_stats.registered);
        println!(
            "  Attendance rate       : {}{}%{}",
            color_for_rate(rate),
            rate,
            RESET
        );

        //
        // Per-program breakdown over the full month
        //
        if programs.is_empty() {
            println!();
            info("No programs registered.");
            return Ok(());
        }

        let breakdown = per_program(&programs, &members, &all_dates, &ledger);

        let rows = breakdown
            .iter()
            .map(|ps| {
                vec![
                    ps.program.name.clone(),
                    ps.stats.unique_attendees.to_string(),
                    ps.stats.cumulative_attendance.to_string(),
                    ps.stats.active_days.to_string(),
                    ps.stats.registered.to_string(),
                    format!("{}%", ps.rate),
                ]
            })
            .collect();

        let table = Table::auto(
            &["program", "unique", "cumulative", "active", "registered", "rate"],
            rows,
        );
        println!("\nPrograms (month):\n");
        print!("{}", table.render());
    }

    Ok(())
}
