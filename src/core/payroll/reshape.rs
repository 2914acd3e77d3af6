//! Homebase export reshaping.
//!
//! An export is a CSV with a title preamble, a header row, data rows
//! interleaved with separator/blank/subtotal rows and a grand-total row.
//! `scan_lines` keeps header + data rows, `reshape_str` turns them into
//! `TimesheetRecord`s.

use crate::core::payroll::schema::{ColumnIndex, normalize_header, reconcile};
use crate::errors::{AppError, AppResult};
use crate::models::timesheet::TimesheetRecord;
use crate::ui::messages::{info, warning};
use crate::utils::date::parse_export_date;
use crate::utils::path::base_name;
use crate::utils::time::parse_export_time;
use crate::utils::{parse_currency, parse_number};
use chrono::{DateTime, Local, NaiveDateTime};
use std::fs;
use std::path::Path;

/// Literal prefix identifying the header row.
pub const HEADER_MARKER: &str = "Name,Clock in date,Clock in time";

/// Minimum comma-separated fields for a line to count as a data row.
pub const MIN_DATA_FIELDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    BeforeHeader,
    InData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Preamble,
    Separator,
    Blank,
    Subtotal,
    GrandTotal,
    Short,
    Data,
}

/// Classify one raw line given the scanner state.
pub fn classify(state: ScanState, line: &str) -> LineKind {
    if line.contains(HEADER_MARKER) {
        return LineKind::Header;
    }

    match state {
        ScanState::BeforeHeader => LineKind::Preamble,
        ScanState::InData => {
            let trimmed = line.trim();
            if line.starts_with("-,-,-,-") {
                LineKind::Separator
            } else if trimmed.is_empty() || trimmed == "\"\"" {
                LineKind::Blank
            } else if line.contains("Totals for ") {
                LineKind::Subtotal
            } else if line.starts_with("Totals,\"\"") {
                LineKind::GrandTotal
            } else if trimmed.split(',').count() < MIN_DATA_FIELDS {
                LineKind::Short
            } else {
                LineKind::Data
            }
        }
    }
}

/// Header row plus accepted data rows of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedExport<'a> {
    pub header: &'a str,
    pub rows: Vec<&'a str>,
}

/// Run the line scanner over a whole export.
///
/// A later header line replaces an earlier one; rows already accepted are
/// kept.
pub fn scan_lines(content: &str) -> AppResult<ScannedExport<'_>> {
    let mut state = ScanState::BeforeHeader;
    let mut header = None;
    let mut rows = Vec::new();

    for line in content.lines() {
        match classify(state, line) {
            LineKind::Header => {
                header = Some(line);
                state = ScanState::InData;
            }
            LineKind::Data => rows.push(line),
            _ => {}
        }
    }

    let header = header.ok_or_else(|| {
        AppError::MalformedInput("Could not find header row in the CSV file".to_string())
    })?;

    Ok(ScannedExport { header, rows })
}

/// Payroll period printed in the export preamble (second line, second cell,
/// `"<start> To <end>"`).
pub fn payroll_period(content: &str) -> AppResult<(String, String)> {
    let cell = content
        .lines()
        .nth(1)
        .and_then(|l| l.split(',').nth(1))
        .ok_or_else(|| {
            AppError::MalformedInput("Missing payroll period in the second line".to_string())
        })?;

    let (start, end) = cell.split_once(" To ").ok_or_else(|| {
        AppError::MalformedInput(format!("Payroll period '{cell}' has no ' To ' separator"))
    })?;
    Ok((start.trim().to_string(), end.trim().to_string()))
}

/// Location is the leading `_`-separated token of the file name.
pub fn location_from_filename(file_name: &str) -> String {
    file_name.split('_').next().unwrap_or_default().to_string()
}

/// Combine an export date (`March 10 2025`) and clock time (`9:44am`).
///
/// Missing parts give `None` silently; unparseable parts give `None` with a
/// warning.
pub fn parse_datetime(date: Option<&str>, time: Option<&str>) -> Option<NaiveDateTime> {
    let (date, time) = (date?.trim(), time?.trim());
    if date.is_empty() || time.is_empty() {
        return None;
    }

    match (parse_export_date(date), parse_export_time(time)) {
        (Some(d), Some(t)) => Some(d.and_time(t)),
        _ => {
            warning(format!("Error parsing date/time: {date} {time}"));
            None
        }
    }
}

/// Reshape an export file on disk.
pub fn reshape_file(path: &Path, processed_at: DateTime<Local>) -> AppResult<Vec<TimesheetRecord>> {
    let content = fs::read_to_string(path)?;
    reshape_str(&base_name(path), &content, processed_at)
}

/// Reshape export `content`; `file_name` provides the location token.
pub fn reshape_str(
    file_name: &str,
    content: &str,
    processed_at: DateTime<Local>,
) -> AppResult<Vec<TimesheetRecord>> {
    let scanned = scan_lines(content)?;

    let mut table = String::with_capacity(content.len());
    table.push_str(scanned.header);
    table.push('\n');
    for row in &scanned.rows {
        table.push_str(row);
        table.push('\n');
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(table.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(normalize_header).collect();
    let index = reconcile(&headers);
    if !index.missing().is_empty() {
        info(format!(
            "Null output columns for {file_name}: {}",
            index.null_outputs().join(", ")
        ));
    }

    let location = location_from_filename(file_name);
    let (period_start, period_end) = payroll_period(content)?;

    let mut records = Vec::with_capacity(scanned.rows.len());
    for result in rdr.records() {
        let row = result?;
        let cells = RowCells {
            row: &row,
            index: &index,
        };
        records.push(build_record(
            &cells,
            &location,
            &period_start,
            &period_end,
            processed_at,
        ));
    }

    Ok(records)
}

struct RowCells<'a> {
    row: &'a csv::StringRecord,
    index: &'a ColumnIndex,
}

impl RowCells<'_> {
    /// Trimmed cell text; empty cells and missing columns are `None`.
    fn get(&self, source: &str) -> Option<&str> {
        let pos = self.index.position(source)?;
        let v = self.row.get(pos)?.trim();
        if v.is_empty() { None } else { Some(v) }
    }

    fn text(&self, source: &str) -> Option<String> {
        self.get(source).map(str::to_string)
    }

    fn currency(&self, source: &str) -> Option<f64> {
        self.get(source).and_then(parse_currency)
    }

    fn number(&self, source: &str) -> Option<f64> {
        self.get(source).and_then(parse_number)
    }
}

fn build_record(
    c: &RowCells<'_>,
    location: &str,
    period_start: &str,
    period_end: &str,
    processed_at: DateTime<Local>,
) -> TimesheetRecord {
    let clock_in_date = c.get("clock_in_date");

    TimesheetRecord {
        location: location.to_string(),
        payroll_period_start: period_start.to_string(),
        payroll_period_end: period_end.to_string(),
        name: c.text("name"),
        clock_in_datetime: parse_datetime(clock_in_date, c.get("clock_in_time")),
        clock_out_datetime: parse_datetime(c.get("clock_out_date"), c.get("clock_out_time")),
        break_start_datetime: parse_datetime(clock_in_date, c.get("break_start")),
        break_end_datetime: parse_datetime(clock_in_date, c.get("break_end")),
        break_length: c.text("break_length"),
        break_type: c.text("break_type"),
        payroll_id: c.text("payroll_id"),
        role: c.text("role"),
        wage_rate_numeric: c.currency("wage_rate"),
        scheduled_hours: c.number("scheduled_hours"),
        actual_vs_scheduled: c.number("actual_vs_scheduled"),
        total_paid_hours: c.number("total_paid_hours"),
        regular_hours: c.number("regular_hours"),
        unpaid_breaks: c.number("unpaid_breaks"),
        ot_hours: c.number("ot_hours"),
        estimated_wages_numeric: c.currency("estimated_wages"),
        cash_tips_numeric: c.currency("cash_tips"),
        credit_tips_numeric: c.currency("credit_tips"),
        no_show_reason: c.text("no_show_reason"),
        employee_note: c.text("employee_note"),
        manager_note: c.text("manager_note"),
        processed_at,
        clock_in_date_raw: c.text("clock_in_date"),
        clock_in_time_raw: c.text("clock_in_time"),
        clock_out_date_raw: c.text("clock_out_date"),
        clock_out_time_raw: c.text("clock_out_time"),
        break_start_raw: c.text("break_start"),
        break_end_raw: c.text("break_end"),
    }
}
