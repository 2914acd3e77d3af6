use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::payroll::reshape_file;
use crate::errors::AppResult;
use crate::export::export_records;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use chrono::Local;

/// Handle the `reshape` command: run the reshaper on a local export file.
pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Reshape {
        file,
        out,
        format,
        force,
    } = cmd
    {
        let input = expand_tilde(file);
        let records = reshape_file(&input, Local::now())?;

        success(format!(
            "Reshaped {} rows from {}",
            records.len(),
            input.display()
        ));

        if let Some(first) = records.first() {
            info(format!(
                "Location: {} | Period: {} to {}",
                first.location, first.payroll_period_start, first.payroll_period_end
            ));
        }

        if let Some(out) = out {
            export_records(&records, format, &expand_tilde(out), *force)?;
        }
    }
    Ok(())
}
