//! Calendar-date helpers for the rotation boundary tests.
//!
//! These operate on explicit calendar dates rather than duration
//! arithmetic so they cannot drift across months of different lengths.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The date of the first occurrence of `weekday` in the given calendar
/// month, found by scanning forward from the first of the month (at most
/// seven candidate days). Returns `None` for an invalid year/month.
pub fn first_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    (0..7)
        .filter_map(|offset| first.checked_add_days(Days::new(offset)))
        .find(|date| date.weekday() == weekday)
}
