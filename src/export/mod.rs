// src/export/mod.rs

mod fs_utils;
mod writers;

use crate::errors::AppResult;
use crate::models::timesheet::TimesheetRecord;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Write reshaped records to `path`, asking before overwriting unless
/// `force` is set.
pub fn export_records(
    records: &[TimesheetRecord],
    format: &ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<()> {
    fs_utils::prepare_output(path, force)?;

    match format {
        ExportFormat::Csv => writers::write_csv(records, path),
        ExportFormat::Json => writers::write_json(records, path),
    }
}
