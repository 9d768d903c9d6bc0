use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::program::Program;

pub struct ProgramLogic;

impl ProgramLogic {
    /// Register a new program. Names are trimmed, required, and unique
    /// within the operator's scope.
    pub fn add(pool: &mut DbPool, operator: &str, name: &str) -> AppResult<Program> {
        let name = name.trim();

        if name.is_empty() {
            return Err(AppError::Validation("program name must not be empty".into()));
        }
        if queries::program_name_taken(&pool.conn, operator, name)? {
            return Err(AppError::DuplicateProgram(name.to_string()));
        }

        let id = queries::insert_program(&pool.conn, operator, name)?;

        ttlog(
            &pool.conn,
            "program_add",
            &id.to_string(),
            &format!("Program '{}' registered for operator '{}'", name, operator),
        )?;

        Ok(Program {
            id,
            name: name.to_string(),
        })
    }

    /// Delete a program. The deletion cascades to the program's members
    /// and their attendance marks.
    pub fn delete(pool: &mut DbPool, operator: &str, id: i64) -> AppResult<Program> {
        let program = queries::find_program(&pool.conn, operator, id)?
            .ok_or(AppError::ProgramNotFound(id))?;

        queries::delete_program_cascade(&mut pool.conn, operator, id)?;

        ttlog(
            &pool.conn,
            "program_del",
            &id.to_string(),
            &format!(
                "Program '{}' deleted (members and marks removed)",
                program.name
            ),
        )?;

        Ok(program)
    }
}
