//! rbizsync library root.
//! Exposes the CLI parser, the high-level run() function and the pipelines.

pub mod browser;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod drive;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Validate { .. } => cli::commands::validate::handle(&cli.command, cfg),
        Commands::Reshape { .. } => cli::commands::reshape::handle(&cli.command, cfg),
        Commands::Sync { .. } => cli::commands::sync::handle(&cli.command, cfg),
        Commands::Invoke { .. } => cli::commands::invoke::handle(&cli.command, cfg),
        Commands::Scrape { .. } => cli::commands::scrape::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
