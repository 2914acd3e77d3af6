//! Time utilities: parsing export clock times, formatting run durations.

use chrono::{NaiveTime, TimeDelta};

/// Clock time layout used inside Homebase exports (`9:44am`).
pub const EXPORT_TIME: &str = "%I:%M%p";

pub fn parse_export_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(&t.trim().to_ascii_lowercase(), EXPORT_TIME).ok()
}

/// Format an elapsed run time as `HH:MM:SS`.
pub fn format_elapsed(d: TimeDelta) -> String {
    let secs = d.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
