//! Employee directory entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// An employee on the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Monthly base salary.
    #[serde(alias = "salary")]
    pub base_salary: Decimal,
    /// The first day of employment, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_on: Option<NaiveDate>,
}

impl Employee {
    /// Returns true if the employee was employed on or before `date`.
    ///
    /// Employees without a joining date are treated as always employed.
    ///
    /// # Example
    ///
    /// ```
    /// use xtrack::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     name: "Asha".to_string(),
    ///     base_salary: Decimal::from(30000),
    ///     joined_on: NaiveDate::from_ymd_opt(2025, 4, 15),
    /// };
    /// assert!(employee.employed_by(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()));
    /// assert!(!employee.employed_by(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
    /// ```
    pub fn employed_by(&self, date: NaiveDate) -> bool {
        self.joined_on.is_none_or(|joined| joined <= date)
    }
}
