use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::member::Member;
use crate::utils::date;
use chrono::NaiveDate;

/// Partial update for `member edit`; None leaves the field untouched.
#[derive(Debug, Default)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub program_id: Option<i64>,
}

pub struct MemberLogic;

impl MemberLogic {
    /// Register a new member.
    /// The program must exist; its name is copied onto the member at
    /// assignment time. The registration date defaults to today.
    pub fn add(
        pool: &mut DbPool,
        operator: &str,
        name: &str,
        phone: Option<&str>,
        program_id: i64,
        registered_on: Option<NaiveDate>,
    ) -> AppResult<Member> {
        let name = name.trim();

        if name.is_empty() {
            return Err(AppError::Validation("member name must not be empty".into()));
        }

        let program = queries::find_program(&pool.conn, operator, program_id)?
            .ok_or(AppError::ProgramNotFound(program_id))?;

        let phone = phone.unwrap_or("").trim();
        let registered_on = registered_on.unwrap_or_else(date::today);

        let id = queries::insert_member(&pool.conn, operator, name, phone, &program, registered_on)?;

        ttlog(
            &pool.conn,
            "member_add",
            &id.to_string(),
            &format!("Member '{}' registered in program '{}'", name, program.name),
        )?;

        Ok(Member {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            program_id: program.id,
            program_name: program.name,
            registered_on,
        })
    }

    /// Apply a partial update. Changing the program refreshes the
    /// denormalized program name.
    pub fn edit(
        pool: &mut DbPool,
        operator: &str,
        id: i64,
        update: MemberUpdate,
    ) -> AppResult<Member> {
        let mut member =
            queries::find_member(&pool.conn, operator, id)?.ok_or(AppError::MemberNotFound(id))?;

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("member name must not be empty".into()));
            }
            member.name = name;
        }

        if let Some(phone) = update.phone {
            member.phone = phone.trim().to_string();
        }

        if let Some(program_id) = update.program_id {
            let program = queries::find_program(&pool.conn, operator, program_id)?
                .ok_or(AppError::ProgramNotFound(program_id))?;
            member.program_id = program.id;
            member.program_name = program.name;
        }

        queries::update_member(&pool.conn, operator, &member)?;

        ttlog(
            &pool.conn,
            "member_edit",
            &id.to_string(),
            &format!("Member '{}' updated", member.name),
        )?;

        Ok(member)
    }

    /// Delete a member and all their marks.
    pub fn delete(pool: &mut DbPool, operator: &str, id: i64) -> AppResult<Member> {
        let member =
            queries::find_member(&pool.conn, operator, id)?.ok_or(AppError::MemberNotFound(id))?;

        queries::delete_member(&mut pool.conn, operator, id)?;

        ttlog(
            &pool.conn,
            "member_del",
            &id.to_string(),
            &format!("Member '{}' deleted (marks removed)", member.name),
        )?;

        Ok(member)
    }
}
