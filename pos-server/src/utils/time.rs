//! Date range parsing for report filters
//!
//! Dates are `YYYY-MM-DD` calendar days in UTC. A range is inclusive on both
//! ends: the end bound covers the whole end day.

use chrono::{NaiveDate, NaiveTime};
use shared::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Half-open millisecond window `[start_ms, end_ms)`; either side may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
}

impl DateRange {
    /// Build a range from optional `start_date` / `end_date` strings
    ///
    /// Blank strings count as absent. A malformed date or an end before the
    /// start is a validation error.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, AppError> {
        let start_ms = non_blank(start)
            .map(|s| parse_date(s, "start_date"))
            .transpose()?
            .map(day_start_millis);
        let end_ms = non_blank(end)
            .map(|s| parse_date(s, "end_date"))
            .transpose()?
            .map(|d| day_start_millis(d) + DAY_MS);

        if let (Some(s), Some(e)) = (start_ms, end_ms)
            && e <= s
        {
            return Err(AppError::validation("end_date must not be before start_date")
                .with_detail("field", "end_date"));
        }

        Ok(Self { start_ms, end_ms })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        AppError::invalid_format(format!("{field} must be a date in YYYY-MM-DD format"))
            .with_detail("field", field)
            .with_detail("value", value)
    })
}

fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}
