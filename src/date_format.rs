//! Date formats for the JSON API.

use time::{
    Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};
use time_tz::OffsetDateTimeExt;

use crate::Error;

// Serializes dates as `YYYY-MM-DD`.
time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Parse a date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps resolve to the calendar date in `canonical_timezone`, so
/// "2024-01-31T22:30:00Z" is the 1st of February in "Africa/Johannesburg".
/// Calendar dates are taken as is.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` matches neither format, or
/// [Error::InvalidTimezoneError] if a timestamp is given and the timezone is
/// not a valid, canonical timezone name.
pub fn parse_date(text: &str, canonical_timezone: &str) -> Result<Date, Error> {
    let text = text.trim();

    if let Ok(date) = Date::parse(text, format_description!("[year]-[month]-[day]")) {
        return Ok(date);
    }

    let timestamp =
        OffsetDateTime::parse(text, &Rfc3339).map_err(|_| Error::InvalidDate(text.to_owned()))?;
    let timezone = time_tz::timezones::get_by_name(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", canonical_timezone);
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })?;

    Ok(timestamp.to_timezone(timezone).date())
}
