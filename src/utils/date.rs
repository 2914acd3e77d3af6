use chrono::{FixedOffset, NaiveDate, Utc};

/// Date layout used in file names (`2025-03-10`).
pub const ISO_DATE: &str = "%Y-%m-%d";
/// Date layout used inside Homebase exports (`March 10 2025`).
pub const EXPORT_DATE: &str = "%B %d %Y";
/// Date layout shown on CRM contact pages (`03/10/2025`).
pub const US_DATE: &str = "%m/%d/%Y";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Current date at a fixed UTC offset, or on the host clock when `None`.
/// An offset outside ±23 hours gives `None`.
pub fn today_at(utc_offset_hours: Option<i32>) -> Option<NaiveDate> {
    match utc_offset_hours {
        None => Some(today()),
        Some(h) if h.abs() < 24 => {
            let tz = FixedOffset::east_opt(h * 3600)?;
            Some(Utc::now().with_timezone(&tz).date_naive())
        }
        Some(_) => None,
    }
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE).ok()
}

pub fn parse_export_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), EXPORT_DATE).ok()
}

pub fn parse_us_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), US_DATE).ok()
}
