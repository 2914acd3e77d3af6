use crate::config::PayrollConfig;
use crate::core::observer::RunObserver;
use crate::core::payroll::reshape::reshape_str;
use crate::core::payroll::validator::table_id_from_filename;
use crate::db::Warehouse;
use crate::drive::{FileStore, RemoteFile};
use crate::errors::AppResult;
use crate::models::report::SyncReport;
use crate::ui::messages::{error, info, success, warning};
use chrono::Local;
use std::fs;
use tempfile::Builder;

/// Payroll sync: intake folder → reshape → warehouse.
pub struct SyncDriver<'a> {
    cfg: &'a PayrollConfig,
    files: &'a mut dyn FileStore,
    warehouse: &'a mut dyn Warehouse,
    observer: &'a mut dyn RunObserver,
    loaded_folder: Option<String>,
}

impl<'a> SyncDriver<'a> {
    pub fn new(
        cfg: &'a PayrollConfig,
        files: &'a mut dyn FileStore,
        warehouse: &'a mut dyn Warehouse,
        observer: &'a mut dyn RunObserver,
    ) -> Self {
        Self {
            cfg,
            files,
            warehouse,
            observer,
            loaded_folder: None,
        }
    }

    /// Process every candidate file in the source folder.
    ///
    /// Per-file failures are collected in the report; only failures to list
    /// the folder or prepare the dataset abort the run.
    pub fn run(&mut self) -> AppResult<SyncReport> {
        self.loaded_folder = match self
            .files
            .ensure_folder(&self.cfg.source_folder, &self.cfg.loaded_folder)
        {
            Ok(id) => {
                info(format!("Using '{}' folder: {id}", self.cfg.loaded_folder));
                Some(id)
            }
            Err(e) => {
                error(format!(
                    "Error creating '{}' folder: {e}",
                    self.cfg.loaded_folder
                ));
                None
            }
        };

        self.warehouse.ensure_dataset(&self.cfg.dataset_ref())?;

        let files = self
            .files
            .list_files(&self.cfg.source_folder, &self.cfg.name_filter)?;

        if files.is_empty() {
            return Ok(SyncReport::empty_intake());
        }

        let mut report = SyncReport::default();
        for file in &files {
            self.process_file(file, &mut report);
        }
        Ok(report)
    }

    fn process_file(&mut self, file: &RemoteFile, report: &mut SyncReport) {
        // An existing table means the period is being reprocessed: drop it.
        self.drop_existing_table(&file.name);

        let table_id = match table_id_from_filename(&file.name, self.cfg) {
            Ok(Some(id)) => id,
            Ok(None) => {
                let msg = format!("Could not extract date range from filename: {}", file.name);
                self.record_error(&file.name, msg, report);
                return;
            }
            Err(e) => {
                let msg = format!("Invalid file {}: {e}", file.name);
                self.record_error(&file.name, msg, report);
                // relocate anyway so the file is not retried forever
                self.relocate(&file.id);
                return;
            }
        };

        match self.load_file(file, &table_id) {
            Ok(rows) => {
                success(format!("Loaded {rows} rows from {} into {table_id}", file.name));
                self.observer.record(
                    "load",
                    &file.name,
                    &format!("Loaded {rows} rows into {table_id}"),
                );
                report.processed.push(file.name.clone());
            }
            Err(e) => {
                let msg = format!("Error processing file {}: {e}", file.name);
                self.record_error(&file.name, msg, report);
            }
        }
    }

    fn record_error(&mut self, file_name: &str, msg: String, report: &mut SyncReport) {
        error(&msg);
        self.observer.record("reject", file_name, &msg);
        report.errors.push(msg);
    }

    /// Drop the destination table when it already exists. Never skips.
    fn drop_existing_table(&mut self, file_name: &str) {
        let table_id = match table_id_from_filename(file_name, self.cfg) {
            Ok(Some(id)) => id,
            _ => return,
        };

        match self.warehouse.table_exists(&table_id) {
            Ok(true) => {
                info(format!("Table {table_id} exists. Dropping it for reprocessing."));
                match self.warehouse.delete_table(&table_id) {
                    Ok(()) => info(format!("Table {table_id} dropped successfully.")),
                    Err(e) => error(format!("Error checking/dropping table {table_id}: {e}")),
                }
            }
            Ok(false) => info(format!(
                "Table {table_id} does not exist. File has not been processed."
            )),
            Err(e) => error(format!("Error checking/dropping table {table_id}: {e}")),
        }
    }

    fn load_file(&mut self, file: &RemoteFile, table_id: &str) -> AppResult<usize> {
        // removed when dropped, whichever way this returns
        let temp = Builder::new()
            .prefix("rbizsync_")
            .suffix(".csv")
            .tempfile()?;
        self.files.download(&file.id, temp.path())?;

        // the remote name, not the temp name, carries the location token
        let content = fs::read_to_string(temp.path())?;
        let records = reshape_str(&file.name, &content, Local::now())?;
        let rows = self.warehouse.load_timesheets(table_id, &records)?;

        let view = self.cfg.qualified(&self.cfg.view);
        let mv = self.cfg.qualified(&self.cfg.materialized_view);
        match self.warehouse.materialize_view(&view, &mv) {
            Ok(()) => info("Successfully updated materialized view table."),
            Err(e) => error(format!("Error updating materialized view: {e}")),
        }

        self.relocate(&file.id);
        Ok(rows)
    }

    /// Move a file to the loaded folder, falling back to a copy.
    /// Failures are logged and never abort the run.
    fn relocate(&mut self, file_id: &str) {
        let Some(folder) = self.loaded_folder.clone() else {
            warning(format!(
                "Cannot move file: '{}' folder is missing",
                self.cfg.loaded_folder
            ));
            return;
        };

        match self.files.move_to(file_id, &folder) {
            Ok(()) => info(format!("Successfully moved file {file_id} to folder {folder}")),
            Err(move_err) => {
                error(format!("Error moving file {file_id} to '{folder}': {move_err}"));
                info(format!("Attempting to copy file {file_id} to loaded folder instead"));
                match self.files.copy_to(file_id, &folder) {
                    Ok(()) => info(format!("Successfully copied file {file_id} to folder {folder}")),
                    Err(copy_err) => {
                        error(format!("Error copying file {file_id} to '{folder}': {copy_err}"))
                    }
                }
            }
        }
    }
}
