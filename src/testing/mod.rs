//! Testing utilities and fixtures
//!
//! Builders for intake submissions plus a pinned evaluation date, shared by
//! unit tests, integration tests, and benchmarks.

pub mod fixtures;

use crate::abstractions::FixedClock;
use crate::validation::IntakeValidator;
use chrono::NaiveDate;

pub use fixtures::{ContactInputBuilder, PatientInputBuilder};

/// Evaluation date used across the test suite
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap_or_default()
}

/// Validator with default rules pinned to `date`
pub fn validator_on(date: NaiveDate) -> IntakeValidator<FixedClock> {
    IntakeValidator::with_clock(FixedClock::new(date))
}

/// Birth date string for a patient who turns `years` exactly on `today`
pub fn birth_date_years_before(today: NaiveDate, years: u32) -> String {
    today
        .checked_sub_months(chrono::Months::new(years * 12))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}
