//! Calendar composition of a payroll month.
//!
//! This module splits a month into Sundays, non-working Saturdays, holidays
//! and working days, and answers whether an individual date is a working day.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::NonWorkingSaturdays;
use crate::error::{XtrackError, XtrackResult};
use crate::models::Holiday;

/// How the days of one month are classified for payroll.
///
/// `working_days + sundays + non_working_saturdays + holidays == total_days`
/// holds for every value produced by [`compose_month`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Days in the month.
    pub total_days: u32,
    /// Sundays in the month.
    pub sundays: u32,
    /// Saturdays treated as non-working.
    pub non_working_saturdays: u32,
    /// Distinct holiday dates that are not already Sundays or non-working Saturdays.
    pub holidays: u32,
    /// Everything else.
    pub working_days: u32,
}

/// Returns the first and last day of a month.
///
/// # Errors
///
/// Returns [`XtrackError::Validation`] if `month` is not 1-12 or the year is
/// out of range.
///
/// # Example
///
/// ```
/// use xtrack::calculation::month_bounds;
/// use chrono::NaiveDate;
///
/// let (first, last) = month_bounds(2024, 2).unwrap();
/// assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn month_bounds(year: i32, month: u32) -> XtrackResult<(NaiveDate, NaiveDate)> {
    let invalid = || XtrackError::validation("month", format!("{}-{} is not a valid month", year, month));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}

/// Number of days in a month (28-31).
pub fn days_in_month(year: i32, month: u32) -> XtrackResult<u32> {
    month_bounds(year, month).map(|(_, last)| last.day())
}

/// Counts how many times `weekday` occurs in a month.
pub fn count_weekday(year: i32, month: u32, weekday: Weekday) -> XtrackResult<u32> {
    let (first, last) = month_bounds(year, month)?;
    Ok(first
        .iter_days()
        .take_while(|d| *d <= last)
        .filter(|d| d.weekday() == weekday)
        .count() as u32)
}

/// Parses a `YYYY-MM` month key.
pub fn parse_month_key(text: &str) -> XtrackResult<(i32, u32)> {
    let invalid = || XtrackError::validation("month", format!("'{}' is not in YYYY-MM form", text));

    let (year, month) = text.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    month_bounds(year, month)?;
    Ok((year, month))
}

/// Formats a month as `YYYY-MM`.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

impl NonWorkingSaturdays {
    /// Number of non-working Saturdays in a month under this policy.
    pub fn count_in_month(&self, year: i32, month: u32) -> XtrackResult<u32> {
        let saturdays = count_weekday(year, month, Weekday::Sat)?;
        Ok(match self {
            NonWorkingSaturdays::Fixed { count } => (*count).min(saturdays),
            NonWorkingSaturdays::NthOfMonth { weeks } => {
                let (first, last) = month_bounds(year, month)?;
                first
                    .iter_days()
                    .take_while(|d| *d <= last)
                    .filter(|d| self.identifies(*d) && weeks.contains(&saturday_ordinal(*d)))
                    .count() as u32
            }
            NonWorkingSaturdays::All => saturdays,
            NonWorkingSaturdays::None => 0,
        })
    }

    /// Returns true if the policy names `date` as a non-working Saturday.
    ///
    /// A `Fixed` policy only says how many Saturdays are off, never which,
    /// so it identifies no date.
    pub fn identifies(&self, date: NaiveDate) -> bool {
        if date.weekday() != Weekday::Sat {
            return false;
        }
        match self {
            NonWorkingSaturdays::Fixed { .. } | NonWorkingSaturdays::None => false,
            NonWorkingSaturdays::NthOfMonth { weeks } => weeks.contains(&saturday_ordinal(date)),
            NonWorkingSaturdays::All => true,
        }
    }
}

/// 1-based position of a Saturday within its month.
fn saturday_ordinal(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

/// Returns true if `date` is a working day: not a Sunday, not an identified
/// non-working Saturday and not a registry holiday.
pub fn is_working_day(date: NaiveDate, holidays: &[Holiday], saturdays: &NonWorkingSaturdays) -> bool {
    date.weekday() != Weekday::Sun
        && !saturdays.identifies(date)
        && !holidays.iter().any(|h| h.falls_on(date))
}

/// Classifies the days of a month.
///
/// Holidays are counted once per distinct date, and only on days not
/// already removed as Sundays or identified non-working Saturdays.
///
/// # Errors
///
/// - [`XtrackError::Validation`] for an invalid month
/// - [`XtrackError::CalculationError`] if the removed days exceed the month
///
/// # Example
///
/// ```
/// use xtrack::calculation::compose_month;
/// use xtrack::config::NonWorkingSaturdays;
///
/// // June 2025: 30 days, 5 Sundays
/// let month = compose_month(2025, 6, &[], &NonWorkingSaturdays::Fixed { count: 1 }).unwrap();
/// assert_eq!(month.total_days, 30);
/// assert_eq!(month.sundays, 5);
/// assert_eq!(month.non_working_saturdays, 1);
/// assert_eq!(month.working_days, 24);
/// ```
pub fn compose_month(
    year: i32,
    month: u32,
    holidays: &[Holiday],
    saturdays: &NonWorkingSaturdays,
) -> XtrackResult<MonthCalendar> {
    let (first, last) = month_bounds(year, month)?;
    let total_days = last.day();
    let sundays = count_weekday(year, month, Weekday::Sun)?;
    let non_working_saturdays = saturdays.count_in_month(year, month)?;

    let holiday_dates: BTreeSet<NaiveDate> = holidays
        .iter()
        .map(|h| h.date)
        .filter(|d| *d >= first && *d <= last)
        .filter(|d| d.weekday() != Weekday::Sun && !saturdays.identifies(*d))
        .collect();
    let holiday_count = holiday_dates.len() as u32;

    let working_days = total_days
        .checked_sub(sundays)
        .and_then(|d| d.checked_sub(non_working_saturdays))
        .and_then(|d| d.checked_sub(holiday_count))
        .ok_or_else(|| XtrackError::CalculationError {
            message: format!(
                "{} has {} days but {} Sundays, {} non-working Saturdays and {} holidays",
                month_key(year, month),
                total_days,
                sundays,
                non_working_saturdays,
                holiday_count
            ),
        })?;

    Ok(MonthCalendar {
        year,
        month,
        total_days,
        sundays,
        non_working_saturdays,
        holidays: holiday_count,
        working_days,
    })
}
