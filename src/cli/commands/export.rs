use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config, operator: &str) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        year,
        month,
        program,
        force,
    } = cmd
    {
        let (current_year, current_month) = date::current_year_month();
        let year = year.unwrap_or(current_year);
        let month = month.unwrap_or(current_month);

        // Default output name carries the exported period.
        let file = match file {
            Some(f) => f.clone(),
            None => {
                let name = format!("attendance_{}_{:02}.{}", year, month, format.as_str());
                std::env::current_dir()?.join(name).to_string_lossy().to_string()
            }
        };

        let mut pool = DbPool::new(&cfg.database)?;

        ExportLogic::export(
            &mut pool,
            cfg,
            operator,
            format.clone(),
            &file,
            year,
            month,
            *program,
            *force,
        )?;
    }

    Ok(())
}
