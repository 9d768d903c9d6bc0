use crate::cli::parser::{Commands, ProgramAction};
use crate::config::Config;
use crate::core::program::ProgramLogic;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, operator: &str) -> AppResult<()> {
    if let Commands::Program { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            //
            // ADD
            //
            ProgramAction::Add { name } => {
                let program = ProgramLogic::add(&mut pool, operator, name)?;
                success(format!(
                    "Program '{}' registered (id {}).",
                    program.name, program.id
                ));
            }

            //
            // DEL (cascades to members and marks)
            //
            ProgramAction::Del { id, yes } => {
                let member_count = queries::member_count(&pool.conn, operator, *id)?;

                let prompt = format!(
                    "Delete program #{} and its {} member(s), including their marks? This action is irreversible.",
                    id, member_count
                );

                if !*yes && !ask_confirmation(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }

                let program = ProgramLogic::delete(&mut pool, operator, *id)?;
                success(format!(
                    "Program '{}' and its members have been deleted.",
                    program.name
                ));
            }

            //
            // LIST
            //
            ProgramAction::List => {
                let programs = queries::load_programs(&mut pool, operator)?;

                if programs.is_empty() {
                    info(format!("No programs registered for '{}'.", operator));
                    return Ok(());
                }

                let mut rows = Vec::new();
                for p in &programs {
                    let members = queries::member_count(&pool.conn, operator, p.id)?;
                    rows.push(vec![p.id.to_string(), p.name.clone(), members.to_string()]);
                }

                let table = Table::auto(&["id", "name", "members"], rows);
                println!("\nPrograms ({}):\n", operator);
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
