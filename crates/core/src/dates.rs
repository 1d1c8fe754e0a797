//! Parsing of client-supplied completion dates.
//!
//! Clients send either full RFC 3339 timestamps or calendar dates. Calendar
//! dates come in two shapes: ISO (`2026-10-17`) and the en-US locale form a
//! browser produces with `toLocaleDateString()` (`10/17/2026`, zero padding
//! optional). Calendar dates are interpreted as UTC midnight.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Accepted calendar date layouts, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a calendar date in ISO or en-US locale form.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid date '{value}', expected M/D/YYYY or YYYY-MM-DD"
            ))
        })
}

/// Parse the `dateCompleted` field of a completion record into a timestamp.
///
/// RFC 3339 values keep their instant; calendar dates become UTC midnight.
pub fn parse_completion_timestamp(value: &str) -> Result<Timestamp, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value.trim()) {
        return Ok(dt.with_timezone(&Utc));
    }
    parse_calendar_date(value).map(start_of_day)
}

fn start_of_day(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Half-open UTC window `[start, end)` covering whole calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DayRange {
    /// Build the window spanning `start_date` through `end_date`, both inclusive.
    ///
    /// Rejects unparseable bounds and ranges whose end precedes their start.
    pub fn from_bounds(start_date: &str, end_date: &str) -> Result<Self, CoreError> {
        let first = parse_calendar_date(start_date)?;
        let last = parse_calendar_date(end_date)?;

        if last < first {
            return Err(CoreError::Validation(format!(
                "endDate {end_date} is before startDate {start_date}"
            )));
        }

        let after_last = last
            .succ_opt()
            .ok_or_else(|| CoreError::Validation(format!("endDate {end_date} is out of range")))?;

        Ok(Self {
            start: start_of_day(first),
            end: start_of_day(after_last),
        })
    }

    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.start && ts < self.end
    }
}
