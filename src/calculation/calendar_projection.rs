//! Day-by-day projection of holidays and approved leaves.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{XtrackError, XtrackResult};
use crate::models::{CalendarDay, Holiday, LeaveRequest};

use super::month_calendar::month_bounds;

/// Longest range, in days, a single projection may cover.
pub const MAX_PROJECTION_DAYS: i64 = 366;

/// Projects holidays and approved leaves onto each day from `start` to `end`.
///
/// A leave appears on every day of its inclusive date range whatever its
/// day type. Leaves that are not approved are ignored.
///
/// # Errors
///
/// Returns [`XtrackError::Validation`] if `start` is after `end` or the
/// range is longer than [`MAX_PROJECTION_DAYS`].
///
/// # Example
///
/// ```
/// use xtrack::calculation::project_calendar;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
/// let days = project_calendar(start, end, &[], &[]).unwrap();
/// assert_eq!(days.len(), 7);
/// assert!(days.iter().all(|d| d.is_empty()));
/// ```
pub fn project_calendar(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &[Holiday],
    leaves: &[LeaveRequest],
) -> XtrackResult<Vec<CalendarDay>> {
    if start > end {
        return Err(XtrackError::validation(
            "end",
            format!("{} is before {}", end, start),
        ));
    }
    let span = (end - start).num_days() + 1;
    if span > MAX_PROJECTION_DAYS {
        return Err(XtrackError::validation(
            "end",
            format!("range of {} days exceeds {}", span, MAX_PROJECTION_DAYS),
        ));
    }

    let approved: Vec<&LeaveRequest> = leaves.iter().filter(|l| l.is_approved()).collect();

    Ok(start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| CalendarDay {
            date,
            holidays: holidays.iter().filter(|h| h.falls_on(date)).cloned().collect(),
            leaves: approved
                .iter()
                .filter(|l| l.contains_date(date))
                .map(|l| (*l).clone())
                .collect(),
        })
        .collect())
}

/// The range shown by a month grid: the Sunday on or before the 1st to the
/// Saturday on or after the last day.
pub fn month_view_range(year: i32, month: u32) -> XtrackResult<(NaiveDate, NaiveDate)> {
    let (first, last) = month_bounds(year, month)?;
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - i64::from(last.weekday().num_days_from_sunday());
    Ok((first - Duration::days(lead), last + Duration::days(trail)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayType, HolidayCategory, LeaveStatus, LeaveType};
    use chrono::{NaiveTime, Utc, Weekday};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leave(id: u64, status: LeaveStatus, start: NaiveDate, end: NaiveDate) -> LeaveRequest {
        LeaveRequest {
            id,
            employee_id: 1,
            leave_type: LeaveType::Vacation,
            start_date: start,
            end_date: end,
            day_type: DayType::Full,
            start_time: None,
            end_time: None,
            total_days: Decimal::from((end - start).num_days() + 1),
            reason: "Trip".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_leave_appears_on_each_day_of_its_range() {
        let leaves = vec![leave(1, LeaveStatus::Approved, date(2025, 3, 10), date(2025, 3, 12))];
        let days = project_calendar(date(2025, 3, 9), date(2025, 3, 13), &[], &leaves).unwrap();

        let covered: Vec<bool> = days.iter().map(|d| !d.leaves.is_empty()).collect();
        assert_eq!(covered, vec![false, true, true, true, false]);
    }

    #[test]
    fn test_half_day_leave_covers_whole_range() {
        let mut half = leave(1, LeaveStatus::Approved, date(2025, 3, 10), date(2025, 3, 11));
        half.day_type = DayType::Half;
        half.start_time = NaiveTime::from_hms_opt(9, 0, 0);
        half.end_time = NaiveTime::from_hms_opt(13, 0, 0);

        let days = project_calendar(date(2025, 3, 10), date(2025, 3, 11), &[], &[half]).unwrap();
        assert!(days.iter().all(|d| d.leaves.len() == 1));
    }

    #[test]
    fn test_unapproved_leaves_are_not_projected() {
        let leaves = vec![
            leave(1, LeaveStatus::Pending, date(2025, 3, 10), date(2025, 3, 10)),
            leave(2, LeaveStatus::Rejected, date(2025, 3, 10), date(2025, 3, 10)),
            leave(3, LeaveStatus::Cancelled, date(2025, 3, 10), date(2025, 3, 10)),
        ];
        let days = project_calendar(date(2025, 3, 10), date(2025, 3, 10), &[], &leaves).unwrap();
        assert!(days[0].is_empty());
    }

    #[test]
    fn test_holidays_sharing_a_date_all_appear() {
        let holidays = vec![
            Holiday {
                id: 1,
                name: "Holi".to_string(),
                date: date(2025, 3, 14),
                category: HolidayCategory::Public,
            },
            Holiday {
                id: 2,
                name: "Team Outing".to_string(),
                date: date(2025, 3, 14),
                category: HolidayCategory::CompanyEvent,
            },
        ];
        let days = project_calendar(date(2025, 3, 14), date(2025, 3, 14), &holidays, &[]).unwrap();
        assert_eq!(days[0].holidays.len(), 2);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = project_calendar(date(2025, 3, 2), date(2025, 3, 1), &[], &[]);
        assert!(matches!(result, Err(XtrackError::Validation { .. })));
    }

    #[test]
    fn test_range_longer_than_a_year_is_rejected() {
        assert!(project_calendar(date(2024, 1, 1), date(2024, 12, 31), &[], &[]).is_ok());
        assert!(project_calendar(date(2024, 1, 1), date(2025, 1, 1), &[], &[]).is_err());
    }

    #[test]
    fn test_month_view_is_padded_to_whole_weeks() {
        // March 2025 runs Saturday 1st to Monday 31st
        let (start, end) = month_view_range(2025, 3).unwrap();
        assert_eq!(start, date(2025, 2, 23));
        assert_eq!(end, date(2025, 4, 5));
        assert_eq!(start.weekday(), Weekday::Sun);
        assert_eq!(end.weekday(), Weekday::Sat);
        assert_eq!(((end - start).num_days() + 1) % 7, 0);
    }
}
