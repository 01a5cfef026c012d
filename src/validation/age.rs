//! Whole-year age at an evaluation date

use chrono::{Datelike, NaiveDate};

/// Age in completed years on `today`.
///
/// The birthday itself completes the year. A leap-day birth completes its year
/// on 1 March in non-leap years. Birth dates after `today` yield a negative age.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}
