//! Business validation for department, employee and timecard writes.
//!
//! Each validator checks the raw request fields in a fixed order and stops at
//! the first failure, returning a human-readable message. Checks that need
//! existing data (references, uniqueness, one timecard per day) go through the
//! repository traits. On success the validator hands back the typed entity the
//! handler should persist.

pub mod department;
pub mod employee;
pub mod timecard;

pub use department::{validate_department, validate_department_update};
pub use employee::{validate_employee, validate_employee_update};
pub use timecard::{validate_timecard, validate_timecard_update};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::db::{DataError, Field};

lazy_static! {
    /// Strict `yyyy-MM-dd`
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();

    /// Strict `yyyy-MM-dd HH:mm:ss`
    static ref TIMESTAMP_REGEX: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap();

    static ref DIGIT_REGEX: Regex = Regex::new(r"\d").unwrap();
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The request breaks a business rule; the message goes back to the client
    #[error("{0}")]
    Invalid(String),

    /// A lookup needed by a check failed
    #[error(transparent)]
    Data(#[from] DataError),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub(crate) fn fail<T>(message: &str) -> ValidationResult<T> {
    Err(ValidationError::Invalid(message.to_string()))
}

/// Whether a field counts as supplied: missing, null, `""`, `0` and `false` do not.
pub fn is_present(field: &Field) -> bool {
    match field {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map_or(true, |n| n != 0.0),
        Some(Value::Bool(b)) => *b,
        Some(_) => true,
    }
}

/// Whether a field was sent at all (a literal `0` counts)
pub fn is_defined(field: &Field) -> bool {
    !matches!(field, None | Some(Value::Null))
}

/// The field as a string that is non-empty after trimming
pub fn as_text(field: &Field) -> Option<&str> {
    match field {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Numeric value of a JSON number or a numeric string
pub fn as_number(field: &Field) -> Option<f64> {
    let n = match field {
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Integer part of a numeric field, when it is at least 1
pub fn as_positive_id(field: &Field) -> Option<i64> {
    let n = as_number(field)?.trunc();
    (n >= 1.0 && n <= i64::MAX as f64).then_some(n as i64)
}

/// Parse an identifier taken from a query string
pub fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if !DATE_REGEX.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if !TIMESTAMP_REGEX.is_match(raw) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn contains_digit(value: &str) -> bool {
    DIGIT_REGEX.is_match(value)
}
