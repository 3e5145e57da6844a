//! Date and time helpers for analytics windows.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::server::error::{request::RequestError, Error};

/// Start of the UTC day before `now`, the day the scheduled snapshot job covers.
pub fn previous_utc_day(now: DateTime<Utc>) -> Result<NaiveDate, Error> {
    now.date_naive()
        .checked_sub_signed(Duration::days(1))
        .ok_or_else(|| Error::ParseError("Failed to calculate the previous UTC day".to_string()))
}

/// Returns `[start, end)` bounds of a UTC day.
pub fn utc_day_bounds(day: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
    let start = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::ParseError(format!("Failed to build start of day for {day}")))?;

    Ok((start, start + Duration::days(1)))
}

/// Parses a caller supplied date: an RFC 3339 timestamp or a bare `YYYY-MM-DD` day.
///
/// # Returns
/// - `Ok(NaiveDateTime)` - The instant in UTC; bare days resolve to midnight
/// - `Err(RequestError::InvalidArgument)` - Neither format matched
pub fn parse_request_date(field: &str, value: &str) -> Result<NaiveDateTime, RequestError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc).naive_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| RequestError::invalid(format!("{field} must be an RFC 3339 timestamp or YYYY-MM-DD date")))
}

/// Formats a stored UTC timestamp as RFC 3339.
pub fn to_rfc3339(timestamp: NaiveDateTime) -> String {
    timestamp.and_utc().to_rfc3339()
}
