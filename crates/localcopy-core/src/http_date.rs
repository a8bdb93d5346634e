//! HTTP-date handling for the `Last-Modified` header (`Sun, 06 Nov 1994 08:49:37 GMT`).

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::SystemTime;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Parses an HTTP-date into a `SystemTime`. Only the fixed GMT form is
/// accepted: numeric offsets or a missing weekday are errors.
pub fn parse(value: &str) -> Result<SystemTime, chrono::ParseError> {
    let parsed = NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)?;
    Ok(SystemTime::from(parsed.and_utc()))
}

/// Formats a `SystemTime` as an HTTP-date. Sub-second precision is dropped.
pub fn format(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}
