//! Validation helpers for user-supplied fields
//!
//! This module contains the format rules for CPF numbers and judicial process
//! numbers, date parsing, and blank-field checks.

use crate::error::ValidationError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Date format used for bucket keys and user input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static PROCESS_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{7}-[0-9]{2}\.[0-9]{4}\.[0-9]\.[0-9]{2}\.[0-9]{4}$")
        .expect("valid process number regex")
});

/// Normalize a CPF to the canonical `###.###.###-##` form
///
/// All non-digit characters are dropped first, so `"123.456.789-01"`,
/// `"12345678901"` and `" 123 456 789 01 "` all normalize the same way.
///
/// # Returns
/// The formatted CPF, or `None` unless exactly 11 digits remain
///
/// # Examples
/// ```
/// use cpj_prazos::validation::normalize_national_id;
/// assert_eq!(normalize_national_id("12345678901").as_deref(), Some("123.456.789-01"));
/// assert_eq!(normalize_national_id("1234"), None);
/// ```
pub fn normalize_national_id(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return None;
    }
    Some(format!(
        "{}.{}.{}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..]
    ))
}

/// Check a process number against the judicial format `0000000-00.0000.0.00.0000`
///
/// The whole string must match; surrounding whitespace is not trimmed.
pub fn is_valid_process_number(s: &str) -> bool {
    PROCESS_NUMBER_RE.is_match(s)
}

/// Parse a `YYYY-MM-DD` date supplied by the user
pub fn parse_date(date_str: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(date_str.to_string()))
}

/// Parse a stored bucket key, `None` when it is not a valid date
pub fn parse_bucket_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT).ok()
}

/// Format a date as a bucket key
pub fn bucket_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Trim a required field and reject it when blank
pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::BlankField(field))
    } else {
        Ok(trimmed)
    }
}

/// Check the process number and hand it back unchanged
pub fn require_process_number(process: &str) -> Result<&str, ValidationError> {
    if is_valid_process_number(process) {
        Ok(process)
    } else {
        Err(ValidationError::InvalidProcessNumber(process.to_string()))
    }
}
