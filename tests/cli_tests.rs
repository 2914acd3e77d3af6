mod common;

use common::{VALID_EXPORT_NAME, rbs, sample_export, setup_test_db, temp_folder, temp_out, write_file};
use predicates::str::contains;
use serde_json::Value;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    rbs()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_validate_valid_filename() {
    rbs()
        .args(["validate", "Store_2025-03-03_2025-03-16_timesheets.csv"])
        .assert()
        .success()
        .stdout(contains("tys-bi.homebase.timesheet_20250303_20250316_"));
}

#[test]
fn test_validate_invalid_filename_fails() {
    rbs()
        .args(["validate", "Store_2025-03-03_2025-03-15_timesheets.csv"])
        .assert()
        .failure()
        .stderr(contains("Please check date ranges"))
        .stderr(contains("Saturday"));
}

#[test]
fn test_invoke_test_mode() {
    rbs()
        .args(["invoke", "--payload", r#"{"test": true}"#])
        .assert()
        .success()
        .stdout(contains(
            "Test successful! Validated filename: Restore Round Rock_2023-05-01_2023-05-14_timesheets.csv",
        ));
}

#[test]
fn test_reshape_exports_json() {
    let dir = temp_folder("cli_reshape");
    let input = write_file(&dir, VALID_EXPORT_NAME, &sample_export(false));
    let out = temp_out("cli_reshape", "json");

    rbs()
        .args([
            "reshape",
            input.to_str().unwrap(),
            "--out",
            &out,
            "--format",
            "json",
            "--force",
        ])
        .assert()
        .success()
        .stdout(contains("Reshaped 2 rows"));

    let data = fs::read_to_string(&out).expect("read export");
    let v: Value = serde_json::from_str(&data).expect("json");
    let rows = v.as_array().expect("array of rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["location"], "Restore Round Rock");
    assert_eq!(rows[0]["payroll_period_end"], "May 18 2025");
    assert!(rows[0]["credit_tips_numeric"].is_null());
    assert_eq!(rows[1]["name"], "Jane Smith");
}

#[test]
fn test_reshape_exports_csv_with_header() {
    let dir = temp_folder("cli_reshape_csv");
    let input = write_file(&dir, VALID_EXPORT_NAME, &sample_export(true));
    let out = temp_out("cli_reshape_csv", "csv");

    rbs()
        .args(["reshape", input.to_str().unwrap(), "--out", &out, "--force"])
        .assert()
        .success();

    let data = fs::read_to_string(&out).expect("read export");
    let mut lines = data.lines();
    let header = lines.next().expect("header line");
    assert!(header.starts_with("location,payroll_period_start,payroll_period_end,name"));
    assert!(header.ends_with("break_start_raw,break_end_raw"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn test_sync_then_log() {
    let db_path = setup_test_db("cli_sync");
    let dir = temp_folder("cli_sync");
    write_file(&dir, VALID_EXPORT_NAME, &sample_export(true));

    rbs()
        .args(["--db", &db_path, "sync", "--source", dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains(format!(
            "Successfully processed 1 files: {VALID_EXPORT_NAME}"
        )));

    assert!(dir.join("loaded").join(VALID_EXPORT_NAME).exists());

    rbs()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("load"))
        .stdout(contains("1 processed, 0 rejected"));
}

#[test]
fn test_invoke_full_mode_with_empty_intake() {
    let db_path = setup_test_db("cli_invoke_empty");
    let dir = temp_folder("cli_invoke_empty");

    rbs()
        .args(["--db", &db_path, "invoke", "--source", dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("No files found to process."));
}
