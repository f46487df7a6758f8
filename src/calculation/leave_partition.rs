//! Splitting a month's approved leave into paid and unpaid days.
//!
//! Only working days count: Sundays, registry holidays and Saturdays the
//! policy names as non-working are skipped. A half-day leave counts 0.5 on
//! its start date. Leaves are consumed in start-date order and each leave
//! type draws on its own monthly paid allowance; once the allowance is used
//! up the remaining days are unpaid.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{NonWorkingSaturdays, PayrollPolicy};
use crate::error::XtrackResult;
use crate::models::{DayType, Holiday, LeaveRequest, LeaveType};

use super::month_calendar::{is_working_day, month_bounds};

/// Paid and unpaid leave days of one employee in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeavePartition {
    /// Days covered by the paid allowance.
    pub paid_days: Decimal,
    /// Days deducted from salary.
    pub unpaid_days: Decimal,
}

impl LeavePartition {
    /// Total leave days in the month.
    pub fn total(&self) -> Decimal {
        self.paid_days + self.unpaid_days
    }
}

/// Working days a leave covers between `first` and `last` inclusive.
///
/// Only the overlap of the leave with `first..=last` is walked.
pub fn leave_days_between(
    leave: &LeaveRequest,
    first: NaiveDate,
    last: NaiveDate,
    holidays: &[Holiday],
    saturdays: &NonWorkingSaturdays,
) -> Decimal {
    match leave.day_type {
        DayType::Half => {
            let date = leave.start_date;
            if date >= first && date <= last && is_working_day(date, holidays, saturdays) {
                Decimal::new(5, 1)
            } else {
                Decimal::ZERO
            }
        }
        DayType::Full => {
            let from = leave.start_date.max(first);
            let to = leave.end_date.min(last);
            let days = from
                .iter_days()
                .take_while(|d| *d <= to)
                .filter(|d| is_working_day(*d, holidays, saturdays))
                .count();
            Decimal::from(days)
        }
    }
}

/// Partitions the approved leaves in `leaves` that overlap the month.
///
/// `leaves` should belong to a single employee; requests that are not
/// approved are ignored.
///
/// # Errors
///
/// Returns [`crate::error::XtrackError::Validation`] for an invalid month.
pub fn partition_leave_days(
    leaves: &[LeaveRequest],
    year: i32,
    month: u32,
    holidays: &[Holiday],
    policy: &PayrollPolicy,
) -> XtrackResult<LeavePartition> {
    let (first, last) = month_bounds(year, month)?;

    let mut approved: Vec<&LeaveRequest> = leaves
        .iter()
        .filter(|l| l.is_approved())
        .filter(|l| l.start_date <= last && l.end_date >= first)
        .collect();
    approved.sort_by_key(|l| (l.start_date, l.id));

    let mut remaining: HashMap<LeaveType, Decimal> = HashMap::new();
    let mut partition = LeavePartition::default();

    for leave in approved {
        let days = leave_days_between(leave, first, last, holidays, &policy.non_working_saturdays);
        if days.is_zero() {
            continue;
        }
        let allowance = remaining
            .entry(leave.leave_type)
            .or_insert_with(|| policy.paid_allowance(leave.leave_type));
        let paid = days.min(*allowance);
        *allowance -= paid;
        partition.paid_days += paid;
        partition.unpaid_days += days - paid;
    }

    Ok(partition)
}
