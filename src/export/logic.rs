// src/export/logic.rs

use crate::config::Config;
use crate::core::calendar::month_dates;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::matrix;
use crate::ui::messages::warning;

use crate::export::csv::export_csv;
use crate::export::json::export_json;
use crate::export::xlsx::export_xlsx;
use std::io;
use std::path::Path;

/// High-level export flow: load the snapshot, build the month matrix,
/// hand it to the selected renderer.
pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        operator: &str,
        format: ExportFormat,
        file: &str,
        year: i32,
        month: u32,
        program_filter: Option<i64>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        //
        // 1. Load the snapshot
        //
        let all_members = queries::load_members(pool, operator)?;

        let (members, program_label) = match program_filter {
            None => (all_members, "All programs".to_string()),
            Some(id) => {
                let program = queries::find_program(&pool.conn, operator, id)?
                    .ok_or(AppError::ProgramNotFound(id))?;
                let scoped = all_members
                    .into_iter()
                    .filter(|m| m.program_id == id)
                    .collect();
                (scoped, program.name)
            }
        };

        if members.is_empty() {
            warning("No members found for the selected program.");
            return Ok(());
        }

        let ledger = queries::load_ledger(pool, operator)?;

        //
        // 2. Build the matrix for the whole month
        //
        let dates = month_dates(year, month)?;
        let sheet = matrix::build(
            year,
            month,
            &dates,
            &members,
            &ledger,
            &program_label,
            &cfg.present_marker,
            &cfg.absent_marker,
        );

        //
        // 3. Render
        //
        match format {
            ExportFormat::Csv => export_csv(&sheet, path)?,
            ExportFormat::Json => export_json(&sheet, path)?,
            ExportFormat::Xlsx => export_xlsx(&sheet, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "Exported {} sheet for {}-{:02} ({})",
                format.as_str(),
                year,
                month,
                program_label
            ),
        )?;

        Ok(())
    }
}
