use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceStatus, Ledger};
use crate::models::member::Member;
use crate::models::program::Program;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------
// Programs
// ---------------------------

fn map_program_row(row: &Row) -> Result<Program> {
    Ok(Program {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

pub fn load_programs(pool: &mut DbPool, operator: &str) -> AppResult<Vec<Program>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, name FROM programs
         WHERE operator = ?1
         ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt.query_map([operator], map_program_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_program(conn: &Connection, operator: &str, id: i64) -> AppResult<Option<Program>> {
    let mut stmt = conn.prepare("SELECT id, name FROM programs WHERE operator = ?1 AND id = ?2")?;

    let program = stmt
        .query_row(params![operator, id], map_program_row)
        .optional()?;
    Ok(program)
}

pub fn program_name_taken(conn: &Connection, operator: &str, name: &str) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM programs WHERE operator = ?1 AND name = ?2 LIMIT 1")?;
    Ok(stmt.exists(params![operator, name])?)
}

pub fn insert_program(conn: &Connection, operator: &str, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO programs (operator, name, created_at) VALUES (?1, ?2, ?3)",
        params![operator, name, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Members enrolled in a program (for the `program list` counts).
pub fn member_count(conn: &Connection, operator: &str, program_id: i64) -> AppResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM members WHERE operator = ?1 AND program_id = ?2",
        params![operator, program_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Delete a program together with its members and their marks.
/// Referential integrity after program deletion is cascade, not orphaning.
pub fn delete_program_cascade(conn: &mut Connection, operator: &str, id: i64) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM attendance
         WHERE operator = ?1
           AND member_id IN (SELECT id FROM members WHERE operator = ?1 AND program_id = ?2)",
        params![operator, id],
    )?;
    tx.execute(
        "DELETE FROM members WHERE operator = ?1 AND program_id = ?2",
        params![operator, id],
    )?;
    tx.execute(
        "DELETE FROM programs WHERE operator = ?1 AND id = ?2",
        params![operator, id],
    )?;

    tx.commit()?;
    Ok(())
}

// ---------------------------
// Members
// ---------------------------

fn map_member_row(row: &Row) -> Result<Member> {
    let date_str: String = row.get("registered_on")?;

    let registered_on = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Member {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        program_id: row.get("program_id")?,
        program_name: row.get("program_name")?,
        registered_on,
    })
}

pub fn load_members(pool: &mut DbPool, operator: &str) -> AppResult<Vec<Member>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, name, phone, program_id, program_name, registered_on
         FROM members
         WHERE operator = ?1
         ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt.query_map([operator], map_member_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_member(conn: &Connection, operator: &str, id: i64) -> AppResult<Option<Member>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, phone, program_id, program_name, registered_on
         FROM members
         WHERE operator = ?1 AND id = ?2",
    )?;

    let member = stmt
        .query_row(params![operator, id], map_member_row)
        .optional()?;
    Ok(member)
}

pub fn insert_member(
    conn: &Connection,
    operator: &str,
    name: &str,
    phone: &str,
    program: &Program,
    registered_on: NaiveDate,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO members (operator, name, phone, program_id, program_name, registered_on, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            operator,
            name,
            phone,
            program.id,
            program.name,
            registered_on.format("%Y-%m-%d").to_string(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update all mutable member fields (name, phone, program reference).
pub fn update_member(conn: &Connection, operator: &str, member: &Member) -> AppResult<()> {
    conn.execute(
        "UPDATE members
         SET name = ?1, phone = ?2, program_id = ?3, program_name = ?4, registered_on = ?5
         WHERE operator = ?6 AND id = ?7",
        params![
            member.name,
            member.phone,
            member.program_id,
            member.program_name,
            member.registered_on.format("%Y-%m-%d").to_string(),
            operator,
            member.id,
        ],
    )?;
    Ok(())
}

/// Delete a member and every mark recorded for them.
pub fn delete_member(conn: &mut Connection, operator: &str, id: i64) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM attendance WHERE operator = ?1 AND member_id = ?2",
        params![operator, id],
    )?;
    tx.execute(
        "DELETE FROM members WHERE operator = ?1 AND id = ?2",
        params![operator, id],
    )?;

    tx.commit()?;
    Ok(())
}

// ---------------------------
// Attendance
// ---------------------------

/// Load the full sparse ledger for an operator.
/// Rows with an unknown status value are discarded silently.
pub fn load_ledger(pool: &mut DbPool, operator: &str) -> AppResult<Ledger> {
    let mut stmt = pool
        .conn
        .prepare("SELECT member_id, date, status FROM attendance WHERE operator = ?1")?;

    let rows = stmt.query_map([operator], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut ledger = Ledger::new();
    for r in rows {
        let (member_id, date_str, status_str) = r?;

        let Ok(date) = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") else {
            continue;
        };
        let Some(status) = AttendanceStatus::from_db_str(&status_str) else {
            continue;
        };

        ledger.entry(date).or_default().insert(member_id, status);
    }

    Ok(ledger)
}

/// Current mark for a member/date; a missing row is unset.
pub fn get_mark(
    conn: &Connection,
    operator: &str,
    member_id: i64,
    date: NaiveDate,
) -> AppResult<AttendanceStatus> {
    let mut stmt = conn.prepare_cached(
        "SELECT status FROM attendance
         WHERE operator = ?1 AND member_id = ?2 AND date = ?3",
    )?;

    let status: Option<String> = stmt
        .query_row(
            params![operator, member_id, date.format("%Y-%m-%d").to_string()],
            |row| row.get(0),
        )
        .optional()?;

    Ok(status
        .and_then(|s| AttendanceStatus::from_db_str(&s))
        .unwrap_or(AttendanceStatus::Unset))
}

/// Persist a mark: unset deletes the row, present/absent upserts it.
pub fn set_mark(
    conn: &Connection,
    operator: &str,
    member_id: i64,
    date: NaiveDate,
    status: AttendanceStatus,
) -> AppResult<()> {
    let date_str = date.format("%Y-%m-%d").to_string();

    match status.to_db_str() {
        None => {
            conn.execute(
                "DELETE FROM attendance WHERE member_id = ?1 AND date = ?2",
                params![member_id, date_str],
            )?;
        }
        Some(s) => {
            conn.execute(
                "INSERT INTO attendance (member_id, date, operator, status)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(member_id, date) DO UPDATE SET status = excluded.status",
                params![member_id, date_str, operator, s],
            )?;
        }
    }

    Ok(())
}
