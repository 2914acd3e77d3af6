use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

/// Output column names, in load order.
pub const TIMESHEET_COLUMNS: [&str; 32] = [
    "location",
    "payroll_period_start",
    "payroll_period_end",
    "name",
    "clock_in_datetime",
    "clock_out_datetime",
    "break_start_datetime",
    "break_end_datetime",
    "break_length",
    "break_type",
    "payroll_id",
    "role",
    "wage_rate_numeric",
    "scheduled_hours",
    "actual_vs_scheduled",
    "total_paid_hours",
    "regular_hours",
    "unpaid_breaks",
    "ot_hours",
    "estimated_wages_numeric",
    "cash_tips_numeric",
    "credit_tips_numeric",
    "no_show_reason",
    "employee_note",
    "manager_note",
    "processed_at",
    "clock_in_date_raw",
    "clock_in_time_raw",
    "clock_out_date_raw",
    "clock_out_time_raw",
    "break_start_raw",
    "break_end_raw",
];

/// One employee shift from a Homebase export.
///
/// Field order matches `TIMESHEET_COLUMNS`; serde serializes in
/// declaration order, so CSV/JSON exports keep the load layout.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TimesheetRecord {
    pub location: String,
    pub payroll_period_start: String,
    pub payroll_period_end: String,
    pub name: Option<String>,
    pub clock_in_datetime: Option<NaiveDateTime>,
    pub clock_out_datetime: Option<NaiveDateTime>,
    pub break_start_datetime: Option<NaiveDateTime>,
    pub break_end_datetime: Option<NaiveDateTime>,
    pub break_length: Option<String>,
    pub break_type: Option<String>,
    pub payroll_id: Option<String>,
    pub role: Option<String>,
    pub wage_rate_numeric: Option<f64>,
    pub scheduled_hours: Option<f64>,
    pub actual_vs_scheduled: Option<f64>,
    pub total_paid_hours: Option<f64>,
    pub regular_hours: Option<f64>,
    pub unpaid_breaks: Option<f64>,
    pub ot_hours: Option<f64>,
    pub estimated_wages_numeric: Option<f64>,
    pub cash_tips_numeric: Option<f64>,
    pub credit_tips_numeric: Option<f64>,
    pub no_show_reason: Option<String>,
    pub employee_note: Option<String>,
    pub manager_note: Option<String>,
    pub processed_at: DateTime<Local>,
    pub clock_in_date_raw: Option<String>,
    pub clock_in_time_raw: Option<String>,
    pub clock_out_date_raw: Option<String>,
    pub clock_out_time_raw: Option<String>,
    pub break_start_raw: Option<String>,
    pub break_end_raw: Option<String>,
}

/// Textual layout of timestamp cells in the warehouse and in CSV exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell, typed the way the warehouse column is typed.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(Option<String>),
    Timestamp(Option<NaiveDateTime>),
    Float(Option<f64>),
}

impl CellValue {
    /// Flat text form; null cells are empty.
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(v) => v.clone().unwrap_or_default(),
            CellValue::Timestamp(v) => v
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
            CellValue::Float(v) => v.map(|f| f.to_string()).unwrap_or_default(),
        }
    }
}

impl TimesheetRecord {
    /// Cells in `TIMESHEET_COLUMNS` order.
    pub fn cells(&self) -> Vec<CellValue> {
        use CellValue::{Float, Text, Timestamp};
        vec![
            Text(Some(self.location.clone())),
            Text(Some(self.payroll_period_start.clone())),
            Text(Some(self.payroll_period_end.clone())),
            Text(self.name.clone()),
            Timestamp(self.clock_in_datetime),
            Timestamp(self.clock_out_datetime),
            Timestamp(self.break_start_datetime),
            Timestamp(self.break_end_datetime),
            Text(self.break_length.clone()),
            Text(self.break_type.clone()),
            Text(self.payroll_id.clone()),
            Text(self.role.clone()),
            Float(self.wage_rate_numeric),
            Float(self.scheduled_hours),
            Float(self.actual_vs_scheduled),
            Float(self.total_paid_hours),
            Float(self.regular_hours),
            Float(self.unpaid_breaks),
            Float(self.ot_hours),
            Float(self.estimated_wages_numeric),
            Float(self.cash_tips_numeric),
            Float(self.credit_tips_numeric),
            Text(self.no_show_reason.clone()),
            Text(self.employee_note.clone()),
            Text(self.manager_note.clone()),
            Timestamp(Some(self.processed_at.naive_local())),
            Text(self.clock_in_date_raw.clone()),
            Text(self.clock_in_time_raw.clone()),
            Text(self.clock_out_date_raw.clone()),
            Text(self.clock_out_time_raw.clone()),
            Text(self.break_start_raw.clone()),
            Text(self.break_end_raw.clone()),
        ]
    }
}
