//! Entry point contract of the payroll function: an optional JSON payload
//! in, a single text summary out.

use crate::config::PayrollConfig;
use crate::core::payroll::validator::table_id_from_filename;
use crate::errors::AppResult;
use crate::models::report::SyncReport;
use crate::ui::messages::info;
use serde_json::Value;

/// File name validated when a test payload names none.
pub const DEFAULT_TEST_FILENAME: &str = "Restore Round Rock_2023-05-01_2023-05-14_timesheets.csv";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RequestPayload {
    pub test: bool,
    pub filename: Option<String>,
}

/// JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are false.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Parse a request body leniently: a body that is not a JSON object counts
/// as "no payload".
pub fn parse_payload(body: Option<&str>) -> RequestPayload {
    let Some(Value::Object(obj)) = body.and_then(|b| serde_json::from_str::<Value>(b).ok()) else {
        return RequestPayload::default();
    };

    RequestPayload {
        test: obj.get("test").is_some_and(truthy),
        filename: obj
            .get("filename")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Validate a single file name without touching any service.
pub fn run_test_mode(filename: &str, cfg: &PayrollConfig) -> String {
    info(format!("Running in test mode with filename: {filename}"));

    match table_id_from_filename(filename, cfg) {
        Ok(id) => format!(
            "Test successful! Validated filename: {filename}, Table ID: {}",
            id.as_deref().unwrap_or("None")
        ),
        Err(e) => format!("Test validation failed: {e}"),
    }
}

/// Handle one request. `run_sync` performs the full sync and is only called
/// outside test mode.
pub fn handle_request<F>(body: Option<&str>, cfg: &PayrollConfig, run_sync: F) -> String
where
    F: FnOnce() -> AppResult<SyncReport>,
{
    let payload = parse_payload(body);

    if payload.test {
        let filename = payload
            .filename
            .as_deref()
            .unwrap_or(DEFAULT_TEST_FILENAME);
        return run_test_mode(filename, cfg);
    }

    match run_sync() {
        Ok(report) => report.render(),
        Err(e) => format!("Error: {e}"),
    }
}
