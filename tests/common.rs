#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rbizsync::config::{Config, PayrollConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER_WITH_CREDIT_TIPS: &str = "Name,Clock in date,Clock in time,Clock out date,Clock out time,Break start,Break end,Break length,Break type,Payroll ID,Role,Wage rate,Scheduled hours,Actual vs. scheduled,Total paid hours,Regular hours,Unpaid breaks,OT hours,Estimated wages,Cash tips,Credit tips,No show reason,Employee note,Manager note";

pub const HEADER_WITHOUT_CREDIT_TIPS: &str = "Name,Clock in date,Clock in time,Clock out date,Clock out time,Break start,Break end,Break length,Break type,Payroll ID,Role,Wage rate,Scheduled hours,Actual vs. scheduled,Total paid hours,Regular hours,Unpaid breaks,OT hours,Estimated wages,Cash tips,No show reason,Employee note,Manager note";

pub const VALID_EXPORT_NAME: &str = "Restore Round Rock_2025-05-05_2025-05-18_timesheets.csv";

pub fn rbs() -> Command {
    cargo_bin_cmd!("rbizsync")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rbizsync.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, empty directory inside the system temp dir.
pub fn temp_folder(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rbizsync_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp folder");
    path
}

/// Homebase-style export: title line, period line, header, two shifts,
/// then the separator/subtotal/grand-total noise real exports carry.
pub fn sample_export(with_credit_tips: bool) -> String {
    let (header, john, jane) = if with_credit_tips {
        (
            HEADER_WITH_CREDIT_TIPS,
            "John Doe,May 5 2025,9:00am,May 5 2025,5:00pm,12:00pm,1:00pm,1:00,Unpaid,12345,Technician,$15.00,8.00,0.00,7.00,7.00,1.00,0.00,$105.00,$10.00,$15.00,,,",
            "Jane Smith,May 6 2025,8:00am,May 6 2025,4:30pm,12:00pm,12:30pm,0:30,Unpaid,67890,Manager,$20.00,8.00,0.50,8.00,8.00,0.50,0.00,$160.00,$5.00,$20.00,,,",
        )
    } else {
        (
            HEADER_WITHOUT_CREDIT_TIPS,
            "John Doe,May 5 2025,9:00am,May 5 2025,5:00pm,12:00pm,1:00pm,1:00,Unpaid,12345,Technician,$15.00,8.00,0.00,7.00,7.00,1.00,0.00,$105.00,$10.00,,,",
            "Jane Smith,May 6 2025,8:00am,May 6 2025,4:30pm,12:00pm,12:30pm,0:30,Unpaid,67890,Manager,$20.00,8.00,0.50,8.00,8.00,0.50,0.00,$160.00,$5.00,,,",
        )
    };

    format!(
        "Timesheets,,,,\n\
         Restore Round Rock,May 5 2025 To May 18 2025,,,\n\
         \n\
         {header}\n\
         {john}\n\
         -,-,-,-,-,-,-,-\n\
         Totals for John Doe,,,,,,,,,,,,8.00,0.00,7.00\n\
         {jane}\n\
         \"\"\n\
         Totals,\"\",,,,,,,,,,,16.00,0.50,15.00\n"
    )
}

/// Write `content` as `name` inside `dir` and return the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write test file");
    path
}

/// Default configuration with the intake pointed at `source`.
pub fn test_config(source: &Path) -> Config {
    Config {
        payroll: PayrollConfig {
            source_folder: source.to_string_lossy().to_string(),
            ..PayrollConfig::default()
        },
        ..Config::default()
    }
}
