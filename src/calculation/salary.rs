//! Monthly salary aggregation.
//!
//! Combines the month calendar, the leave partition and the payroll policy
//! into a [`SalarySummary`] per employee.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::{PayrollPolicy, PerDayDivisor};
use crate::error::{XtrackError, XtrackResult};
use crate::models::{Employee, Holiday, LeaveRequest, SalarySummary};

use super::leave_partition::partition_leave_days;
use super::month_calendar::{compose_month, month_bounds, month_key};

/// Rounds a money amount half away from zero.
pub fn round_money(amount: Decimal, decimal_places: u32) -> Decimal {
    amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates one employee's salary for a month.
///
/// `leaves` may hold requests of any employee and any status; only the
/// employee's approved leaves are used. Returns `Ok(None)` when the employee
/// joined after the month ended.
///
/// Money values are computed at full precision and rounded once on output.
///
/// # Errors
///
/// - [`XtrackError::Validation`] for an invalid month
/// - [`XtrackError::CalculationError`] when the month has no days left to
///   divide by or more non-working days than days
///
/// # Example
///
/// ```
/// use xtrack::calculation::calculate_salary;
/// use xtrack::config::PayrollPolicy;
/// use xtrack::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: 1,
///     name: "Asha".to_string(),
///     base_salary: Decimal::from(30000),
///     joined_on: None,
/// };
/// let summary = calculate_salary(&employee, 2025, 6, &[], &[], &PayrollPolicy::default())
///     .unwrap()
///     .unwrap();
/// assert_eq!(summary.per_day_rate, Decimal::from(1000));
/// assert_eq!(summary.final_payable_salary, Decimal::from(30000));
/// ```
pub fn calculate_salary(
    employee: &Employee,
    year: i32,
    month: u32,
    holidays: &[Holiday],
    leaves: &[LeaveRequest],
    policy: &PayrollPolicy,
) -> XtrackResult<Option<SalarySummary>> {
    let (_, last) = month_bounds(year, month)?;
    if !employee.employed_by(last) {
        return Ok(None);
    }

    let calendar = compose_month(year, month, holidays, &policy.non_working_saturdays)?;

    let own_leaves: Vec<LeaveRequest> = leaves
        .iter()
        .filter(|l| l.employee_id == employee.id)
        .cloned()
        .collect();
    let partition = partition_leave_days(&own_leaves, year, month, holidays, policy)?;

    let divisor = match policy.per_day_divisor {
        PerDayDivisor::CalendarDays => calendar.total_days,
        PerDayDivisor::WorkingDays => calendar.working_days,
    };
    if divisor == 0 {
        return Err(XtrackError::CalculationError {
            message: format!("{} has no days to divide the salary by", month_key(year, month)),
        });
    }

    let per_day_rate = employee.base_salary / Decimal::from(divisor);
    let paid_leave_salary = partition.paid_days * per_day_rate;
    let final_payable_salary = employee.base_salary - partition.unpaid_days * per_day_rate;

    let dp = policy.money_decimal_places;
    Ok(Some(SalarySummary {
        employee_id: employee.id,
        employee_name: employee.name.clone(),
        base_salary: employee.base_salary,
        year,
        month,
        total_days_in_month: calendar.total_days,
        sunday_count: calendar.sundays,
        non_working_saturday_count: calendar.non_working_saturdays,
        holiday_count: calendar.holidays,
        working_days: calendar.working_days,
        per_day_rate: round_money(per_day_rate, dp),
        paid_leave_days: partition.paid_days,
        unpaid_leave_days: partition.unpaid_days,
        paid_leave_salary: round_money(paid_leave_salary, dp),
        final_payable_salary: round_money(final_payable_salary, dp),
    }))
}

/// Calculates the salary of every employee for a month, ordered by employee id.
///
/// Employees who had not joined by the end of the month are left out.
pub fn calculate_payroll(
    employees: &[Employee],
    year: i32,
    month: u32,
    holidays: &[Holiday],
    leaves: &[LeaveRequest],
    policy: &PayrollPolicy,
) -> XtrackResult<Vec<SalarySummary>> {
    let mut ordered: Vec<&Employee> = employees.iter().collect();
    ordered.sort_by_key(|e| e.id);

    let mut summaries = Vec::with_capacity(ordered.len());
    for employee in ordered {
        if let Some(summary) = calculate_salary(employee, year, month, holidays, leaves, policy)? {
            summaries.push(summary);
        }
    }

    debug!(
        month = %month_key(year, month),
        employees = employees.len(),
        rows = summaries.len(),
        "Payroll calculated"
    );
    Ok(summaries)
}
