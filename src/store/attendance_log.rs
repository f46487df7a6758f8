//! The attendance log: one record per employee per day.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{XtrackError, XtrackResult};
use crate::models::{AttendanceRecord, EmployeeId};

/// Selects attendance records.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    /// Only records on this day.
    pub date: Option<NaiveDate>,
    /// Only records of these employees.
    pub employee_ids: Option<Vec<EmployeeId>>,
}

/// Attendance records keyed by (employee, date).
#[derive(Debug, Clone, Default)]
pub struct AttendanceLog {
    records: BTreeMap<(EmployeeId, NaiveDate), AttendanceRecord>,
}

impl AttendanceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a complete record.
    ///
    /// # Errors
    ///
    /// Returns [`XtrackError::DuplicateAttendance`] when the employee already
    /// has a record for that day.
    pub fn insert(&mut self, record: AttendanceRecord) -> XtrackResult<()> {
        let key = (record.employee_id, record.date);
        if self.records.contains_key(&key) {
            return Err(XtrackError::DuplicateAttendance {
                employee_id: record.employee_id,
                date: record.date,
            });
        }
        self.records.insert(key, record);
        Ok(())
    }

    /// Records a check-in, keeping the earliest one of the day.
    pub fn check_in(&mut self, employee_id: EmployeeId, at: NaiveDateTime) -> AttendanceRecord {
        let date = at.date();
        let time = at.time();
        let record = self
            .records
            .entry((employee_id, date))
            .or_insert_with(|| AttendanceRecord {
                employee_id,
                date,
                first_check_in: None,
                last_check_out: None,
                total_hours: Decimal::ZERO,
            });

        if record.first_check_in.is_none_or(|first| time < first) {
            record.first_check_in = Some(time);
            record.total_hours = worked_hours(record.first_check_in, record.last_check_out);
        }
        debug!(employee_id, date = %date, "Check-in recorded");
        record.clone()
    }

    /// Records a check-out, keeping the latest one of the day.
    ///
    /// # Errors
    ///
    /// Returns [`XtrackError::Validation`] if there is no check-in for that
    /// day or the check-out precedes it.
    pub fn check_out(
        &mut self,
        employee_id: EmployeeId,
        at: NaiveDateTime,
    ) -> XtrackResult<AttendanceRecord> {
        let date = at.date();
        let time = at.time();
        let record = self
            .records
            .get_mut(&(employee_id, date))
            .filter(|r| r.first_check_in.is_some())
            .ok_or_else(|| {
                XtrackError::validation("checkOut", format!("no check-in recorded on {}", date))
            })?;

        if record.first_check_in.is_some_and(|first| time < first) {
            return Err(XtrackError::validation(
                "checkOut",
                format!("{} is before the first check-in", time.format("%H:%M")),
            ));
        }

        if record.last_check_out.is_none_or(|last| time > last) {
            record.last_check_out = Some(time);
            record.total_hours = worked_hours(record.first_check_in, record.last_check_out);
        }
        debug!(employee_id, date = %date, hours = %record.total_hours, "Check-out recorded");
        Ok(record.clone())
    }

    /// Records matching `filter`, ordered by employee then date.
    pub fn list(&self, filter: &AttendanceFilter) -> Vec<AttendanceRecord> {
        self.records
            .values()
            .filter(|r| filter.date.is_none_or(|d| r.date == d))
            .filter(|r| {
                filter
                    .employee_ids
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&r.employee_id))
            })
            .cloned()
            .collect()
    }

    /// Every record of one employee, ordered by date.
    pub fn for_employee(&self, employee_id: EmployeeId) -> Vec<AttendanceRecord> {
        self.list(&AttendanceFilter {
            date: None,
            employee_ids: Some(vec![employee_id]),
        })
    }
}

/// Hours between two punches, rounded to two decimal places.
fn worked_hours(check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> Decimal {
    match (check_in, check_out) {
        (Some(start), Some(end)) if end > start => {
            let minutes = (end - start).num_minutes();
            (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
        }
        _ => Decimal::ZERO,
    }
}
