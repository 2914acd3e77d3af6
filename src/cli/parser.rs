use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rbizsync
/// Payroll export loader and CRM contact enrichment sync
#[derive(Parser)]
#[command(
    name = "rbizsync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Load Homebase payroll exports into a warehouse and sync CRM contact enrichment",
    long_about = None
)]
pub struct Cli {
    /// Override warehouse database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the warehouse database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "List keys missing from the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Validate the payroll period embedded in an export file name
    Validate {
        /// File name such as `Store_2025-03-03_2025-03-16_timesheets.csv`
        filename: String,
    },

    /// Reshape a Homebase export locally and optionally write the result
    Reshape {
        /// Path of the raw export CSV
        file: String,

        #[arg(long, value_name = "FILE", help = "Write the reshaped rows to this file")]
        out: Option<String>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, short = 'f', help = "Overwrite output file without confirmation")]
        force: bool,
    },

    /// Load every pending export from the intake folder into the warehouse
    Sync {
        #[arg(long, value_name = "DIR", help = "Override the intake folder")]
        source: Option<String>,
    },

    /// Handle a function request payload (test mode or full sync)
    Invoke {
        #[arg(long, value_name = "JSON", help = r#"Request body, e.g. '{"test": true}'"#)]
        payload: Option<String>,

        #[arg(long, value_name = "DIR", help = "Override the intake folder")]
        source: Option<String>,
    },

    /// Scrape CRM contact details and merge them into the mapping table
    Scrape {
        #[arg(long, value_name = "URL", help = "Override the WebDriver server URL")]
        webdriver: Option<String>,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
