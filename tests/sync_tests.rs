mod common;

use common::{VALID_EXPORT_NAME, sample_export, temp_folder, test_config, write_file};
use rbizsync::core::observer::{NoopObserver, RunObserver};
use rbizsync::core::payroll::SyncDriver;
use rbizsync::db::{SqliteWarehouse, Warehouse};
use rbizsync::drive::{FileStore, LocalDrive, RemoteFile};
use rbizsync::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};

const TABLE_ID: &str = "tys-bi.homebase.timesheet_20250505_20250518_";

#[derive(Default)]
struct Recorder {
    events: Vec<(String, String)>,
}

impl RunObserver for Recorder {
    fn record(&mut self, operation: &str, target: &str, _message: &str) {
        self.events.push((operation.to_string(), target.to_string()));
    }
}

fn row_count(wh: &SqliteWarehouse, table: &str) -> i64 {
    wh.conn()
        .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |r| r.get(0))
        .expect("count rows")
}

#[test]
fn test_sync_empty_intake() {
    let dir = temp_folder("sync_empty");
    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = LocalDrive::new();
    let mut obs = NoopObserver;

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert!(report.no_files);
    assert_eq!(report.render(), "No files found to process.");
    assert!(dir.join("loaded").is_dir());
}

#[test]
fn test_sync_loads_valid_export_and_moves_it() {
    let dir = temp_folder("sync_valid");
    write_file(&dir, VALID_EXPORT_NAME, &sample_export(true));
    // not a candidate: wrong name
    write_file(&dir, "notes.csv", "nothing here");

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = LocalDrive::new();
    let mut obs = Recorder::default();

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert_eq!(report.processed, vec![VALID_EXPORT_NAME.to_string()]);
    assert!(report.errors.is_empty());
    assert_eq!(
        report.render(),
        format!("Successfully processed 1 files: {VALID_EXPORT_NAME}")
    );

    assert_eq!(row_count(&wh, TABLE_ID), 2);
    let location: String = wh
        .conn()
        .query_row(&format!("SELECT location FROM \"{TABLE_ID}\" LIMIT 1"), [], |r| r.get(0))
        .expect("location");
    assert_eq!(location, "Restore Round Rock");

    assert!(!dir.join(VALID_EXPORT_NAME).exists());
    assert!(dir.join("loaded").join(VALID_EXPORT_NAME).exists());
    assert!(dir.join("notes.csv").exists());
    assert_eq!(obs.events, vec![("load".to_string(), VALID_EXPORT_NAME.to_string())]);
}

#[test]
fn test_sync_rejects_invalid_period_and_relocates() {
    let dir = temp_folder("sync_invalid");
    let bad = "Store_2025-03-03_2025-03-15_timesheets.csv";
    write_file(&dir, bad, &sample_export(true));

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = LocalDrive::new();
    let mut obs = Recorder::default();

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert!(report.processed.is_empty());
    assert_eq!(report.errors.len(), 1);
    let rendered = report.render();
    assert!(rendered.starts_with("Validation errors found in 1 files:"));
    assert!(rendered.contains(&format!("  - Invalid file {bad}: Please check date ranges:")));

    assert!(dir.join("loaded").join(bad).exists());
    assert_eq!(obs.events[0].0, "reject");
}

#[test]
fn test_sync_reports_file_without_dates() {
    let dir = temp_folder("sync_nodates");
    let name = "Store_timesheets.csv";
    write_file(&dir, name, &sample_export(true));

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = LocalDrive::new();
    let mut obs = NoopObserver;

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert_eq!(
        report.errors,
        vec![format!("Could not extract date range from filename: {name}")]
    );
    // left in place
    assert!(dir.join(name).exists());
}

#[test]
fn test_sync_reprocess_replaces_existing_table() {
    let dir = temp_folder("sync_reprocess");
    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = LocalDrive::new();
    let mut obs = NoopObserver;

    for _ in 0..2 {
        write_file(&dir, VALID_EXPORT_NAME, &sample_export(true));
        let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
            .run()
            .expect("sync runs");
        assert_eq!(report.processed.len(), 1);
        std::fs::remove_file(dir.join("loaded").join(VALID_EXPORT_NAME)).ok();
    }

    assert!(wh.table_exists(TABLE_ID).expect("lookup"));
    assert_eq!(row_count(&wh, TABLE_ID), 2);
}

#[test]
fn test_sync_refreshes_materialized_view() {
    let dir = temp_folder("sync_mv");
    write_file(&dir, VALID_EXPORT_NAME, &sample_export(true));

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    // the view needs its base table to exist first
    wh.run_query(&format!(
        "CREATE TABLE \"{TABLE_ID}\" (location TEXT);
         CREATE VIEW \"tys-bi.homebase.timesheets_v\" AS SELECT location FROM \"{TABLE_ID}\";"
    ))
    .expect("create view");

    let mut drive = LocalDrive::new();
    let mut obs = NoopObserver;
    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert_eq!(report.processed.len(), 1);
    assert_eq!(row_count(&wh, "tys-bi.homebase.timesheets_mv"), 2);
}

#[test]
fn test_sync_without_view_still_loads() {
    let dir = temp_folder("sync_noview");
    write_file(&dir, VALID_EXPORT_NAME, &sample_export(true));

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = LocalDrive::new();
    let mut obs = NoopObserver;

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert_eq!(report.processed.len(), 1);
    assert!(!wh.table_exists("tys-bi.homebase.timesheets_mv").expect("lookup"));
}

/// `LocalDrive` whose moves always fail, to exercise the copy fallback.
struct NoMoveDrive {
    inner: LocalDrive,
    copies: usize,
}

impl FileStore for NoMoveDrive {
    fn list_files(&mut self, folder: &str, name_filter: &str) -> AppResult<Vec<RemoteFile>> {
        self.inner.list_files(folder, name_filter)
    }

    fn ensure_folder(&mut self, parent: &str, name: &str) -> AppResult<String> {
        self.inner.ensure_folder(parent, name)
    }

    fn download(&mut self, file_id: &str, dest: &Path) -> AppResult<()> {
        self.inner.download(file_id, dest)
    }

    fn move_to(&mut self, file_id: &str, _folder_id: &str) -> AppResult<()> {
        Err(AppError::Transport(format!("permission denied moving {file_id}")))
    }

    fn copy_to(&mut self, file_id: &str, folder_id: &str) -> AppResult<()> {
        self.copies += 1;
        self.inner.copy_to(file_id, folder_id)
    }
}

#[test]
fn test_sync_falls_back_to_copy_when_move_fails() {
    let dir = temp_folder("sync_copy");
    write_file(&dir, VALID_EXPORT_NAME, &sample_export(true));

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = NoMoveDrive {
        inner: LocalDrive::new(),
        copies: 0,
    };
    let mut obs = NoopObserver;

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert_eq!(report.processed.len(), 1);
    assert_eq!(drive.copies, 1);
    assert!(dir.join(VALID_EXPORT_NAME).exists());
    assert!(dir.join("loaded").join(VALID_EXPORT_NAME).exists());
}

#[test]
fn test_sync_leaves_file_with_open_period_in_intake() {
    let dir = temp_folder("sync_open_period");
    let content = sample_export(true).replace(
        "May 5 2025 To May 18 2025",
        "May 5 2025 - May 18 2025",
    );
    write_file(&dir, VALID_EXPORT_NAME, &content);

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = LocalDrive::new();
    let mut obs = Recorder::default();

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert!(report.processed.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with(&format!("Error processing file {VALID_EXPORT_NAME}:")));
    assert!(report.errors[0].contains("has no ' To ' separator"));

    assert!(!wh.table_exists(TABLE_ID).expect("lookup"));
    assert!(dir.join(VALID_EXPORT_NAME).exists());
    assert!(!dir.join("loaded").join(VALID_EXPORT_NAME).exists());
    assert_eq!(obs.events, vec![("reject".to_string(), VALID_EXPORT_NAME.to_string())]);
}

/// `LocalDrive` that remembers where each download was written.
struct TrackingDrive {
    inner: LocalDrive,
    downloads: Vec<PathBuf>,
}

impl FileStore for TrackingDrive {
    fn list_files(&mut self, folder: &str, name_filter: &str) -> AppResult<Vec<RemoteFile>> {
        self.inner.list_files(folder, name_filter)
    }

    fn ensure_folder(&mut self, parent: &str, name: &str) -> AppResult<String> {
        self.inner.ensure_folder(parent, name)
    }

    fn download(&mut self, file_id: &str, dest: &Path) -> AppResult<()> {
        self.downloads.push(dest.to_path_buf());
        self.inner.download(file_id, dest)
    }

    fn move_to(&mut self, file_id: &str, folder_id: &str) -> AppResult<()> {
        self.inner.move_to(file_id, folder_id)
    }

    fn copy_to(&mut self, file_id: &str, folder_id: &str) -> AppResult<()> {
        self.inner.copy_to(file_id, folder_id)
    }
}

#[test]
fn test_sync_removes_download_when_reshape_fails() {
    let dir = temp_folder("sync_cleanup");
    write_file(
        &dir,
        VALID_EXPORT_NAME,
        "Timesheets,,,,\nRestore Round Rock,May 5 2025 To May 18 2025,,,\nJohn Doe,May 5 2025,9:00am\n",
    );

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = TrackingDrive {
        inner: LocalDrive::new(),
        downloads: Vec::new(),
    };
    let mut obs = NoopObserver;

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Could not find header row"));
    assert_eq!(drive.downloads.len(), 1);
    assert!(!drive.downloads[0].exists());
    assert!(dir.join(VALID_EXPORT_NAME).exists());
}

#[test]
fn test_sync_removes_download_after_load() {
    let dir = temp_folder("sync_cleanup_ok");
    write_file(&dir, VALID_EXPORT_NAME, &sample_export(true));

    let cfg = test_config(&dir);
    let mut wh = SqliteWarehouse::in_memory(&cfg).expect("warehouse");
    let mut drive = TrackingDrive {
        inner: LocalDrive::new(),
        downloads: Vec::new(),
    };
    let mut obs = NoopObserver;

    let report = SyncDriver::new(&cfg.payroll, &mut drive, &mut wh, &mut obs)
        .run()
        .expect("sync runs");

    assert_eq!(report.processed.len(), 1);
    assert_eq!(drive.downloads.len(), 1);
    assert!(!drive.downloads[0].exists());
}
