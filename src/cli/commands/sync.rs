use crate::cli::parser::Commands;
use crate::config::{Config, PayrollConfig};
use crate::core::observer::EventLog;
use crate::core::payroll::SyncDriver;
use crate::db::SqliteWarehouse;
use crate::db::log::ttlog;
use crate::drive::LocalDrive;
use crate::errors::AppResult;
use crate::models::report::SyncReport;
use crate::ui::messages::{header, warning};
use crate::utils::path::expand_tilde;

/// Run one payroll sync against the configured warehouse, reading from
/// `source` when given instead of the configured intake folder.
pub(crate) fn run_payroll_sync(cfg: &Config, source: Option<&str>) -> AppResult<SyncReport> {
    let payroll = PayrollConfig {
        source_folder: expand_tilde(source.unwrap_or(&cfg.payroll.source_folder))
            .to_string_lossy()
            .to_string(),
        ..cfg.payroll.clone()
    };

    let mut warehouse = SqliteWarehouse::open(cfg)?;
    let mut drive = LocalDrive::new();
    let mut events = EventLog::new();

    let result = SyncDriver::new(&payroll, &mut drive, &mut warehouse, &mut events).run();

    events.flush_to(warehouse.conn());
    if let Ok(report) = &result {
        let summary = format!(
            "{} processed, {} rejected",
            report.processed.len(),
            report.errors.len()
        );
        if let Err(e) = ttlog(warehouse.conn(), "sync", &payroll.source_folder, &summary) {
            warning(format!("Failed to write internal log: {e}"));
        }
    }

    result
}

/// Handle the `sync` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync { source } = cmd {
        header("Payroll sync");
        let report = run_payroll_sync(cfg, source.as_deref())?;
        println!("{}", report.render());
    }
    Ok(())
}
