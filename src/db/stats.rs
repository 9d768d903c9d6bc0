use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let programs: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM programs", [], |row| row.get(0))?;
    let members: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?;
    let marks: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;

    println!("{}• Programs:{} {}{}{}", CYAN, RESET, GREEN, programs, RESET);
    println!("{}• Members:{}  {}{}{}", CYAN, RESET, GREEN, members, RESET);
    println!("{}• Marks:{}    {}{}{}", CYAN, RESET, GREEN, marks, RESET);

    //
    // 3) MARK DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Mark date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) ACTIVE DAYS (days with at least one present mark)
    //
    let active_days: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT date) FROM attendance WHERE status = 'present'",
        [],
        |row| row.get(0),
    )?;

    println!(
        "{}• Days with attendance:{} {}",
        CYAN, RESET, active_days
    );

    println!();
    Ok(())
}
