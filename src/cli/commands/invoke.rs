use crate::cli::commands::sync::run_payroll_sync;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::payroll::handler::handle_request;
use crate::errors::AppResult;

/// Handle the `invoke` command: the function entry point, driven from the
/// command line with an optional JSON request body.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Invoke { payload, source } = cmd {
        let response = handle_request(payload.as_deref(), &cfg.payroll, || {
            run_payroll_sync(cfg, source.as_deref())
        });
        println!("{response}");
    }
    Ok(())
}
