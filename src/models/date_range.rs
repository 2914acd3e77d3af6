use chrono::{Datelike, NaiveDate, Weekday};

/// Inclusive length of a payroll period, in days.
pub const PERIOD_DAYS: i64 = 14;

/// Start/end pair embedded in an export file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days covered, both ends included. Negative when reversed.
    pub fn inclusive_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn starts_on_monday(&self) -> bool {
        self.start.weekday() == Weekday::Mon
    }

    pub fn ends_on_sunday(&self) -> bool {
        self.end.weekday() == Weekday::Sun
    }

    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }

    pub fn is_payroll_period(&self) -> bool {
        self.starts_on_monday()
            && self.ends_on_sunday()
            && self.inclusive_days() == PERIOD_DAYS
    }
}

/// Full English weekday name ("Monday", ...).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
