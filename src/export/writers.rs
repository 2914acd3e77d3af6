// src/export/writers.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::timesheet::{TIMESHEET_COLUMNS, TimesheetRecord};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pretty-printed JSON array, one object per shift; nulls are kept.
pub(crate) fn write_json(records: &[TimesheetRecord], path: &Path) -> AppResult<()> {
    info(format!("Writing {} rows as JSON: {}", records.len(), path.display()));

    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, records)?;
    out.write_all(b"\n")?;
    out.flush()?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV in warehouse column order. Timestamps use the warehouse layout and
/// null cells are left empty, so the file can be bulk-loaded as is.
pub(crate) fn write_csv(records: &[TimesheetRecord], path: &Path) -> AppResult<()> {
    info(format!("Writing {} rows as CSV: {}", records.len(), path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(TIMESHEET_COLUMNS)?;

    for record in records {
        wtr.write_record(record.cells().iter().map(|c| c.render()))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path);
    Ok(())
}
