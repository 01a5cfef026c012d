//! Scalar format checks shared by the field layer

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Spanish mobile number: optional country prefix, then 9 ASCII digits starting with 6-9
static SPANISH_MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+34|0034|34)?[6-9][0-9]{8}$").expect("Invalid regex pattern"));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(?:\.[A-Za-z0-9_'+\-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("Invalid regex pattern")
});

/// Check a raw phone string against the Spanish mobile pattern.
///
/// No whitespace or punctuation is tolerated.
pub fn is_spanish_mobile(phone: &str) -> bool {
    SPANISH_MOBILE.is_match(phone)
}

/// Syntactic email check
pub fn is_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Interpret a form-encoded boolean.
///
/// Returns `None` for strings that are not a recognised encoding.
pub fn parse_form_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Trimmed-empty check used by both layers
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
