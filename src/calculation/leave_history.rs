//! Month-by-month leave usage per employee.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::error::XtrackResult;
use crate::models::{Employee, EmployeeId, Holiday, LeaveHistoryRow, LeaveRequest, LeaveStatus};

use super::leave_partition::partition_leave_days;
use super::month_calendar::month_key;

/// Summarises leave usage for every (month, employee) pair touched by a
/// non-cancelled leave.
///
/// `applied_leaves` sums the requested days of leaves starting in the month;
/// paid and unpaid days come from the approved-leave partition of that
/// month. `remaining_earned_leave` is the month's total paid allowance less
/// the paid days used. Rows are ordered by month then employee id. With
/// `only_month` set, rows for other months are dropped.
pub fn summarize_leave_history(
    employees: &[Employee],
    leaves: &[LeaveRequest],
    holidays: &[Holiday],
    policy: &PayrollPolicy,
    only_month: Option<(i32, u32)>,
) -> XtrackResult<Vec<LeaveHistoryRow>> {
    let names: BTreeMap<EmployeeId, &str> =
        employees.iter().map(|e| (e.id, e.name.as_str())).collect();

    let mut by_employee: BTreeMap<EmployeeId, Vec<LeaveRequest>> = BTreeMap::new();
    for leave in leaves.iter().filter(|l| l.status != LeaveStatus::Cancelled) {
        by_employee.entry(leave.employee_id).or_default().push(leave.clone());
    }

    let mut keys: BTreeSet<((i32, u32), EmployeeId)> = BTreeSet::new();
    for (employee_id, own) in &by_employee {
        for leave in own {
            for ym in months_spanned(leave.start_date, leave.end_date) {
                if only_month.is_none_or(|m| m == ym) {
                    keys.insert((ym, *employee_id));
                }
            }
        }
    }

    let total_allowance = policy.total_paid_allowance();
    let mut rows = Vec::with_capacity(keys.len());
    for ((year, month), employee_id) in keys {
        let own = by_employee.get(&employee_id).map(Vec::as_slice).unwrap_or_default();

        let applied_leaves: Decimal = own
            .iter()
            .filter(|l| l.start_date.year() == year && l.start_date.month() == month)
            .map(|l| l.total_days)
            .sum();
        let partition = partition_leave_days(own, year, month, holidays, policy)?;

        rows.push(LeaveHistoryRow {
            employee_id,
            name: names
                .get(&employee_id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("Employee #{}", employee_id)),
            month: month_key(year, month),
            applied_leaves,
            paid_leaves: partition.paid_days,
            unpaid_leaves: partition.unpaid_days,
            remaining_earned_leave: (total_allowance - partition.paid_days).max(Decimal::ZERO),
        });
    }

    Ok(rows)
}

/// Every (year, month) from the month of `start` to the month of `end`.
fn months_spanned(start: NaiveDate, end: NaiveDate) -> Vec<(i32, u32)> {
    let mut months = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    while (year, month) <= (end.year(), end.month()) {
        months.push((year, month));
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NonWorkingSaturdays;
    use crate::models::{DayType, LeaveType};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leave(
        id: u64,
        employee_id: u64,
        status: LeaveStatus,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LeaveRequest {
        LeaveRequest {
            id,
            employee_id,
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

    fn employees() -> Vec<Employee> {
        vec![
            Employee {
                id: 1,
                name: "Sarah Johnson".to_string(),
                base_salary: dec!(30000),
                joined_on: None,
            },
            Employee {
                id: 2,
                name: "Mike Chen".to_string(),
                base_salary: dec!(42000),
                joined_on: None,
            },
        ]
    }

    fn policy() -> PayrollPolicy {
        let mut policy = PayrollPolicy {
            non_working_saturdays: NonWorkingSaturdays::None,
            ..PayrollPolicy::default()
        };
        policy.paid_leave_days_per_month.insert(LeaveType::Vacation, dec!(1));
        policy
    }

    #[test]
    fn test_rows_are_ordered_by_month_then_employee() {
        let leaves = vec![
            leave(1, 2, LeaveStatus::Approved, date(2025, 4, 1), date(2025, 4, 1)),
            leave(2, 2, LeaveStatus::Approved, date(2025, 3, 3), date(2025, 3, 3)),
            leave(3, 1, LeaveStatus::Pending, date(2025, 3, 4), date(2025, 3, 4)),
        ];
        let rows = summarize_leave_history(&employees(), &leaves, &[], &policy(), None).unwrap();
        let keys: Vec<(String, u64)> = rows.iter().map(|r| (r.month.clone(), r.employee_id)).collect();
        assert_eq!(
            keys,
            vec![
                ("2025-03".to_string(), 1),
                ("2025-03".to_string(), 2),
                ("2025-04".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_applied_counts_pending_but_partition_does_not() {
        let leaves = vec![
            leave(1, 1, LeaveStatus::Pending, date(2025, 3, 3), date(2025, 3, 4)),
            leave(2, 1, LeaveStatus::Approved, date(2025, 3, 10), date(2025, 3, 12)),
        ];
        let rows = summarize_leave_history(&employees(), &leaves, &[], &policy(), None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Sarah Johnson");
        assert_eq!(rows[0].applied_leaves, dec!(5));
        assert_eq!(rows[0].paid_leaves, dec!(1));
        assert_eq!(rows[0].unpaid_leaves, dec!(2));
        assert_eq!(rows[0].remaining_earned_leave, Decimal::ZERO);
    }

    #[test]
    fn test_remaining_earned_leave_sums_allowances_less_paid_days() {
        let mut policy = policy();
        policy.paid_leave_days_per_month.insert(LeaveType::Sick, dec!(1));
        policy.paid_leave_days_per_month.insert(LeaveType::Personal, dec!(0.5));

        let leaves = vec![
            leave(1, 1, LeaveStatus::Approved, date(2025, 3, 3), date(2025, 3, 3)),
            leave(2, 2, LeaveStatus::Pending, date(2025, 3, 4), date(2025, 3, 4)),
        ];
        let rows = summarize_leave_history(&employees(), &leaves, &[], &policy, None).unwrap();
        assert_eq!(rows[0].remaining_earned_leave, dec!(1.5));
        // Pending leaves leave the allowance untouched
        assert_eq!(rows[1].remaining_earned_leave, dec!(2.5));
    }

    #[test]
    fn test_history_of_long_leave_covers_every_month() {
        let leaves = vec![leave(1, 1, LeaveStatus::Approved, date(2025, 1, 1), date(2025, 12, 31))];
        let rows = summarize_leave_history(&employees(), &leaves, &[], &policy(), None).unwrap();
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.paid_leaves == dec!(1)));
        assert_eq!(rows[0].applied_leaves, dec!(365));
        // March 2025: 31 days less 5 Sundays
        assert_eq!(rows[2].paid_leaves + rows[2].unpaid_leaves, dec!(26));
    }

    #[test]
    fn test_cancelled_leaves_are_excluded() {
        let leaves = vec![leave(1, 1, LeaveStatus::Cancelled, date(2025, 3, 3), date(2025, 3, 4))];
        let rows = summarize_leave_history(&employees(), &leaves, &[], &policy(), None).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_leave_spanning_months_yields_both_months() {
        let leaves = vec![leave(1, 1, LeaveStatus::Approved, date(2025, 3, 31), date(2025, 4, 1))];
        let rows = summarize_leave_history(&employees(), &leaves, &[], &policy(), None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].applied_leaves, dec!(2));
        assert_eq!(rows[1].applied_leaves, Decimal::ZERO);
        assert_eq!(rows[1].paid_leaves, dec!(1));
    }

    #[test]
    fn test_month_filter() {
        let leaves = vec![
            leave(1, 1, LeaveStatus::Approved, date(2025, 3, 3), date(2025, 3, 3)),
            leave(2, 1, LeaveStatus::Approved, date(2025, 4, 1), date(2025, 4, 1)),
        ];
        let rows =
            summarize_leave_history(&employees(), &leaves, &[], &policy(), Some((2025, 4))).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, "2025-04");
    }

    #[test]
    fn test_unknown_employee_gets_placeholder_name() {
        let leaves = vec![leave(1, 9, LeaveStatus::Pending, date(2025, 3, 3), date(2025, 3, 3))];
        let rows = summarize_leave_history(&employees(), &leaves, &[], &policy(), None).unwrap();
        assert_eq!(rows[0].name, "Employee #9");
    }

    #[test]
    fn test_months_spanned_crosses_year_end() {
        assert_eq!(
            months_spanned(date(2025, 12, 30), date(2026, 1, 2)),
            vec![(2025, 12), (2026, 1)]
        );
    }
}
