//! Derived salary and leave-summary rows.
//!
//! Nothing in this module is persisted: every value is recomputed on demand
//! from the employee directory, the holiday registry and the leave ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// The monthly salary breakdown for one employee.
///
/// `working_days + sunday_count + non_working_saturday_count + holiday_count`
/// always equals `total_days_in_month`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySummary {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The employee's display name.
    pub employee_name: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Days in the month (28-31).
    pub total_days_in_month: u32,
    /// Sundays in the month.
    pub sunday_count: u32,
    /// Saturdays treated as non-working.
    pub non_working_saturday_count: u32,
    /// Holidays on otherwise working days.
    pub holiday_count: u32,
    /// Days left once weekends and holidays are removed.
    pub working_days: u32,
    /// Salary for one day.
    pub per_day_rate: Decimal,
    /// Approved leave days paid under the leave policy.
    pub paid_leave_days: Decimal,
    /// Approved leave days beyond the paid allowance.
    pub unpaid_leave_days: Decimal,
    /// Value of the paid leave days.
    pub paid_leave_salary: Decimal,
    /// Base salary less unpaid leave.
    pub final_payable_salary: Decimal,
}

/// One employee's leave usage for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveHistoryRow {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The employee's display name.
    pub name: String,
    /// The month as `YYYY-MM`.
    pub month: String,
    /// Days requested (any status but cancelled) in leaves starting that month.
    pub applied_leaves: Decimal,
    /// Approved days covered by the paid allowance.
    pub paid_leaves: Decimal,
    /// Approved days beyond the paid allowance.
    pub unpaid_leaves: Decimal,
    /// Paid allowance left in the month, over all leave types.
    pub remaining_earned_leave: Decimal,
}
