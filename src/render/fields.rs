//! Record field formatting.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::chat::FieldValue;

/// Shown for null fields
pub const NULL_PLACEHOLDER: &str = "N/A";

/// Shown when a date field cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// US-style month/day/year without padding, e.g. `1/1/1990`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Field names containing `dob` (any case) hold dates
pub fn is_date_field(key: &str) -> bool {
    key.to_lowercase().contains("dob")
}

/// Format one field value for display.
pub fn format_field(key: &str, value: &FieldValue, date_format: &str) -> String {
    match value {
        FieldValue::Null => NULL_PLACEHOLDER.to_string(),
        value if is_date_field(key) => format_date(value, date_format),
        value => value.to_string(),
    }
}

/// Check that a strftime pattern can format a bare calendar date.
///
/// Unknown specifiers fail, and so do time or zone specifiers (`%H`, `%Z`)
/// since dates carry neither.
pub fn is_valid_date_format(date_format: &str) -> bool {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|date| write_date(date, date_format))
        .is_some()
}

fn format_date(value: &FieldValue, date_format: &str) -> String {
    parse_date(value)
        .and_then(|date| write_date(date, date_format))
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// `None` when the pattern cannot be applied to a date
fn write_date(date: NaiveDate, date_format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(date_format)).ok()?;
    Some(out)
}

fn parse_date(value: &FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Text(s) => parse_date_str(s.trim()),
        // Numbers are epoch milliseconds
        FieldValue::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
