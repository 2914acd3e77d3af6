pub mod contact;
pub mod date_range;
pub mod report;
pub mod timesheet;
