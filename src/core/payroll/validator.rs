use crate::config::PayrollConfig;
use crate::errors::{AppError, AppResult};
use crate::models::date_range::{DateRange, PERIOD_DAYS, weekday_name};
use crate::ui::messages::error;
use crate::utils::date::parse_iso_date;
use chrono::Datelike;
use regex::Regex;
use std::sync::OnceLock;

/// Result of checking a file-name date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCheck {
    pub valid: bool,
    /// Every failed rule, joined with `"; "`. Empty when valid.
    pub message: String,
}

fn period_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"_(\d{4}-\d{2}-\d{2})_(\d{4}-\d{2}-\d{2})_").expect("static regex")
    })
}

/// Check that `start..=end` is a 14-day Monday-to-Sunday payroll period.
///
/// All failed rules are reported together. Only an unparseable date is an
/// `Err`.
pub fn validate_date_range(start: &str, end: &str) -> AppResult<RangeCheck> {
    let start_date =
        parse_iso_date(start).ok_or_else(|| AppError::InvalidDate(format!("invalid date '{start}'")))?;
    let end_date =
        parse_iso_date(end).ok_or_else(|| AppError::InvalidDate(format!("invalid date '{end}'")))?;

    let range = DateRange::new(start_date, end_date);
    let mut errors = Vec::new();

    if !range.starts_on_monday() {
        errors.push(format!(
            "Start date {start} is a {}, not a Monday",
            weekday_name(start_date.weekday())
        ));
    }

    if !range.ends_on_sunday() {
        errors.push(format!(
            "End date {end} is a {}, not a Sunday",
            weekday_name(end_date.weekday())
        ));
    }

    let days = range.inclusive_days();
    if days != PERIOD_DAYS {
        errors.push(format!(
            "Date range is {days} days, expected exactly {PERIOD_DAYS} days"
        ));
    }

    if range.is_reversed() {
        errors.push(format!("End date {end} is before start date {start}"));
    }

    Ok(RangeCheck {
        valid: range.is_payroll_period(),
        message: errors.join("; "),
    })
}

/// Pull the two embedded dates out of a file name, if present.
pub fn extract_dates(file_name: &str) -> Option<(String, String)> {
    period_regex()
        .captures(file_name)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Derive the destination table for an export file.
///
/// - `Ok(None)` when the file name carries no `_YYYY-MM-DD_YYYY-MM-DD_` pair
/// - `Err(Validation)` when the pair is not a valid payroll period
/// - `Ok(Some(id))` otherwise, e.g. `tys-bi.homebase.timesheet_20250303_20250316_`
pub fn table_id_from_filename(file_name: &str, cfg: &PayrollConfig) -> AppResult<Option<String>> {
    let Some((start, end)) = extract_dates(file_name) else {
        return Ok(None);
    };

    let check = match validate_date_range(&start, &end) {
        Ok(c) => c,
        Err(e) => RangeCheck {
            valid: false,
            message: e.to_string(),
        },
    };

    if !check.valid {
        error(format!(
            "Invalid date range in file {file_name}: {}",
            check.message
        ));
        return Err(AppError::Validation(format!(
            "Please check date ranges: {}",
            check.message
        )));
    }

    Ok(Some(format!(
        "{}{}{}_{}_",
        cfg.qualified(""),
        cfg.table_prefix,
        start.replace('-', ""),
        end.replace('-', "")
    )))
}
