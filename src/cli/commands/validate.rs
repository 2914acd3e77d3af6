use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::payroll::table_id_from_filename;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `validate` command: print the table id a file would load into.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Validate { filename } = cmd {
        match table_id_from_filename(filename, &cfg.payroll)? {
            Some(table_id) => success(format!("Valid payroll period. Table ID: {table_id}")),
            None => warning(format!(
                "No date range found in '{filename}'; nothing to validate."
            )),
        }
    }
    Ok(())
}
