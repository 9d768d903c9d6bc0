// src/export/csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::matrix::SheetMatrix;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

fn csv_err(e: csv::Error) -> AppError {
    AppError::from(io::Error::other(format!("CSV write error: {e}")))
}

/// Export the sheet as delimited text.
///
/// The file starts with a UTF-8 byte-order mark so spreadsheet tools detect
/// the encoding, and every cell is quote-wrapped (embedded quotes doubled)
/// so names, phone numbers and program names stay parseable.
pub(crate) fn export_csv(matrix: &SheetMatrix, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut file = File::create(path)?;
    file.write_all(b"\xEF\xBB\xBF")?;

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .flexible(true)
        .from_writer(file);

    wtr.write_record([matrix.title.as_str()]).map_err(csv_err)?;
    wtr.write_record([matrix.filter_label.as_str()])
        .map_err(csv_err)?;
    wtr.write_record(None::<&[u8]>).map_err(csv_err)?;

    wtr.write_record(&matrix.headers).map_err(csv_err)?;
    for row in &matrix.rows {
        wtr.write_record(row).map_err(csv_err)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
