//! Unified application error type.
//! Both pipelines (payroll sync and CRM scrape) return AppError so the CLI
//! layer can report every failure the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Warehouse-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Invalid table identifier: {0}")]
    InvalidTableId(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error parsing dates: {0}")]
    InvalidDate(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Remote services
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Transport error: {0}")]
    Transport(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
