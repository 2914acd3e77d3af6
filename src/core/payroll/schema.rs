//! Expected-vs-observed column reconciliation for Homebase exports.

use crate::ui::messages::warning;
use std::collections::HashMap;

/// Warehouse type of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Timestamp,
    Float,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "STRING",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Float => "FLOAT",
        }
    }
}

/// Warehouse type of each output column.
pub fn column_type(column: &str) -> ColumnType {
    match column {
        "clock_in_datetime" | "clock_out_datetime" | "break_start_datetime"
        | "break_end_datetime" | "processed_at" => ColumnType::Timestamp,
        "wage_rate_numeric"
        | "scheduled_hours"
        | "actual_vs_scheduled"
        | "total_paid_hours"
        | "regular_hours"
        | "unpaid_breaks"
        | "ot_hours"
        | "estimated_wages_numeric"
        | "cash_tips_numeric"
        | "credit_tips_numeric" => ColumnType::Float,
        _ => ColumnType::String,
    }
}

/// Source columns read from an export (normalized names), each with the
/// output columns it feeds.
pub const SOURCE_COLUMNS: &[(&str, &[&str])] = &[
    ("name", &["name"]),
    (
        "clock_in_date",
        &[
            "clock_in_datetime",
            "break_start_datetime",
            "break_end_datetime",
            "clock_in_date_raw",
        ],
    ),
    ("clock_in_time", &["clock_in_datetime", "clock_in_time_raw"]),
    ("clock_out_date", &["clock_out_datetime", "clock_out_date_raw"]),
    ("clock_out_time", &["clock_out_datetime", "clock_out_time_raw"]),
    ("break_start", &["break_start_datetime", "break_start_raw"]),
    ("break_end", &["break_end_datetime", "break_end_raw"]),
    ("break_length", &["break_length"]),
    ("break_type", &["break_type"]),
    ("payroll_id", &["payroll_id"]),
    ("role", &["role"]),
    ("wage_rate", &["wage_rate_numeric"]),
    ("scheduled_hours", &["scheduled_hours"]),
    ("actual_vs_scheduled", &["actual_vs_scheduled"]),
    ("total_paid_hours", &["total_paid_hours"]),
    ("regular_hours", &["regular_hours"]),
    ("unpaid_breaks", &["unpaid_breaks"]),
    ("ot_hours", &["ot_hours"]),
    ("estimated_wages", &["estimated_wages_numeric"]),
    ("cash_tips", &["cash_tips_numeric"]),
    ("credit_tips", &["credit_tips_numeric"]),
    ("no_show_reason", &["no_show_reason"]),
    ("employee_note", &["employee_note"]),
    ("manager_note", &["manager_note"]),
];

/// Normalize an export header cell: trim, spaces to `_`, lowercase.
///
/// `Actual vs. scheduled` becomes `actual_vs_scheduled`.
pub fn normalize_header(raw: &str) -> String {
    let n = raw.trim().replace(' ', "_").to_lowercase();
    if n == "actual_vs._scheduled" {
        "actual_vs_scheduled".to_string()
    } else {
        n
    }
}

/// Where each expected source column sits in the observed header.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
    missing: Vec<&'static str>,
}

impl ColumnIndex {
    pub fn position(&self, source: &str) -> Option<usize> {
        self.positions.get(source).copied()
    }

    /// Expected source columns absent from the export.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// Output columns that will be entirely null because a source is missing.
    pub fn null_outputs(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for (source, outputs) in SOURCE_COLUMNS {
            if self.missing.contains(source) {
                for o in *outputs {
                    if !out.contains(o) {
                        out.push(o);
                    }
                }
            }
        }
        out
    }
}

/// Match observed (normalized) headers against `SOURCE_COLUMNS`.
///
/// Unknown observed columns are ignored. Each missing expected column
/// produces one warning; its outputs are filled with nulls downstream.
pub fn reconcile(observed: &[String]) -> ColumnIndex {
    let mut index = ColumnIndex::default();

    for (source, outputs) in SOURCE_COLUMNS {
        match observed.iter().position(|h| h == source) {
            Some(pos) => {
                index.positions.insert(source, pos);
            }
            None => {
                warning(format!(
                    "'{source}' column not found in CSV. Setting {} to None.",
                    outputs.join(", ")
                ));
                index.missing.push(source);
            }
        }
    }

    index
}
