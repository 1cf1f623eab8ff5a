//! Age calculation for display.
//!
//! Month arithmetic is calendar based (year * 12 + month), never a 30-day
//! approximation. When the target month is shorter than the start day, the
//! date is clamped to the last day of that month: Jan 31 + 1 month is Feb 29
//! in a leap year and Feb 28 otherwise. The same rule drives the vaccination
//! schedule offsets.

use chrono::{Datelike, Months, NaiveDate};
use shared::AgeDisplay;

/// Add whole calendar months, clamping to the last valid day of the target month
///
/// # Panics
///
/// Panics if the result is past the last date chrono can represent.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or_else(|| panic!("{} plus {} months is out of range", date, months))
}

/// Number of complete calendar months from `start` to `end`.
///
/// A month counts as complete once `add_months(start, n) <= end`.
pub fn full_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if months > 0 && add_months(start, months as u32) > end {
        months -= 1;
    }
    months.max(0) as u32
}

/// Bucket the time between `birth` and `today` into days, weeks, months or
/// years and months.
///
/// # Panics
///
/// Panics if `birth` is after `today`. Callers validate dates of birth before
/// they reach this point.
pub fn compute_age(birth: NaiveDate, today: NaiveDate) -> AgeDisplay {
    assert!(
        birth <= today,
        "date of birth {} is after {}",
        birth,
        today
    );

    let months = full_months_between(birth, today);
    if months == 0 {
        let days = (today - birth).num_days() as u32;
        let weeks = days / 7;
        if weeks == 0 {
            AgeDisplay::Days { value: days }
        } else {
            AgeDisplay::Weeks { value: weeks }
        }
    } else if months < 24 {
        AgeDisplay::Months { value: months }
    } else {
        AgeDisplay::YearsMonths {
            years: months / 12,
            months: months % 12,
        }
    }
}
