//! Attendance records: one per employee per day.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Where an attendance day stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Checked in, no check-out yet.
    CheckedIn,
    /// Checked in and out at least once.
    CheckedOut,
}

/// A single employee's attendance for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The day the record tracks.
    pub date: NaiveDate,
    /// Earliest check-in of the day.
    pub first_check_in: Option<NaiveTime>,
    /// Latest check-out of the day.
    pub last_check_out: Option<NaiveTime>,
    /// Hours between first check-in and last check-out.
    pub total_hours: Decimal,
}

impl AttendanceRecord {
    /// Derives the status from the recorded punches.
    pub fn status(&self) -> AttendanceStatus {
        if self.last_check_out.is_some() {
            AttendanceStatus::CheckedOut
        } else {
            AttendanceStatus::CheckedIn
        }
    }

    /// Formats `total_hours` as `"Hh Mm"`.
    ///
    /// # Example
    ///
    /// ```
    /// use xtrack::models::AttendanceRecord;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     employee_id: 1,
    ///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
    ///     first_check_in: None,
    ///     last_check_out: None,
    ///     total_hours: Decimal::new(825, 2),
    /// };
    /// assert_eq!(record.formatted_hours(), "8h 15m");
    /// ```
    pub fn formatted_hours(&self) -> String {
        let whole = self.total_hours.trunc();
        let minutes = ((self.total_hours - whole) * Decimal::from(60))
            .round()
            .to_i64()
            .unwrap_or(0);
        format!("{}h {}m", whole.to_i64().unwrap_or(0), minutes)
    }
}
