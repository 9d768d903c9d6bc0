use crate::cli::parser::{Commands, MemberAction};
use crate::config::Config;
use crate::core::member::{MemberLogic, MemberUpdate};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::date;
use crate::utils::table::Table;

use std::io::{self, Write};

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
    if let Commands::Member { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            //
            // ADD
            //
            MemberAction::Add {
                name,
                program,
                phone,
                registered_on,
            } => {
                let registered = match registered_on {
                    Some(s) => Some(
                        date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
                    ),
                    None => None,
                };

                let member = MemberLogic::add(
                    &mut pool,
                    operator,
                    name,
                    phone.as_deref(),
                    *program,
                    registered,
                )?;

                success(format!(
                    "Member '{}' registered in '{}' (id {}).",
                    member.name, member.program_name, member.id
                ));
            }

            //
            // EDIT
            //
            MemberAction::Edit {
                id,
                name,
                phone,
                program,
            } => {
                if name.is_none() && phone.is_none() && program.is_none() {
                    info("Nothing to update (use --name, --phone or --program).");
                    return Ok(());
                }

                let update = MemberUpdate {
                    name: name.clone(),
                    phone: phone.clone(),
                    program_id: *program,
                };

                let member = MemberLogic::edit(&mut pool, operator, *id, update)?;
                success(format!(
                    "Member '{}' updated (program '{}').",
                    member.name, member.program_name
                ));
            }

            //
            // DEL
            //
            MemberAction::Del { id, yes } => {
                let prompt = format!(
                    "Delete member #{} and all their marks? This action is irreversible.",
                    id
                );

                if !*yes && !ask_confirmation(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }

                let member = MemberLogic::delete(&mut pool, operator, *id)?;
                success(format!("Member '{}' has been deleted.", member.name));
            }

            //
            // LIST
            //
            MemberAction::List { program } => {
                let members = queries::load_members(&mut pool, operator)?;

                let members: Vec<_> = match program {
                    None => members,
                    Some(id) => members.into_iter().filter(|m| m.program_id == *id).collect(),
                };

                if members.is_empty() {
                    info(format!("No members registered for '{}'.", operator));
                    return Ok(());
                }

                let rows = members
                    .iter()
                    .map(|m| {
                        vec![
                            m.id.to_string(),
                            m.name.clone(),
                            m.phone_or_placeholder().to_string(),
                            m.program_name.clone(),
                            m.registered_on_str(),
                        ]
                    })
                    .collect();

                let table = Table::auto(&["id", "name", "phone", "program", "registered"], rows);
                println!("\nMembers ({}):\n", operator);
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
