//! The leave ledger: system of record for leave requests.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;

use crate::error::{XtrackError, XtrackResult};
use crate::models::{EmployeeId, LeaveId, LeaveRequest, LeaveStatus, NewLeave};

const ENTITY: &str = "leave request";

/// Leave requests keyed by id, in submission order.
#[derive(Debug, Clone, Default)]
pub struct LeaveLedger {
    leaves: BTreeMap<LeaveId, LeaveRequest>,
    last_id: LeaveId,
}

impl LeaveLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a new request for `employee_id` in the `pending` state.
    ///
    /// # Errors
    ///
    /// Returns [`XtrackError::Validation`] when the request is incomplete or
    /// inconsistent (see [`NewLeave::validate`]). Nothing is stored on error.
    ///
    /// # Example
    ///
    /// ```
    /// use xtrack::models::{DayType, LeaveStatus, LeaveType, NewLeave};
    /// use xtrack::store::LeaveLedger;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut ledger = LeaveLedger::new();
    /// let leave = ledger.submit(7, NewLeave {
    ///     leave_type: LeaveType::Sick,
    ///     start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
    ///     day_type: DayType::Full,
    ///     start_time: None,
    ///     end_time: None,
    ///     reason: "Flu".to_string(),
    /// }).unwrap();
    /// assert_eq!(leave.status, LeaveStatus::Pending);
    /// assert_eq!(leave.total_days, Decimal::from(2));
    /// ```
    pub fn submit(&mut self, employee_id: EmployeeId, new: NewLeave) -> XtrackResult<LeaveRequest> {
        let total_days = new.validate()?;

        self.last_id += 1;
        let leave = LeaveRequest {
            id: self.last_id,
            employee_id,
            leave_type: new.leave_type,
            start_date: new.start_date,
            end_date: new.end_date,
            day_type: new.day_type,
            start_time: new.start_time,
            end_time: new.end_time,
            total_days,
            reason: new.reason.trim().to_string(),
            status: LeaveStatus::Pending,
            created_at: Utc::now(),
        };
        debug!(leave_id = leave.id, employee_id, total_days = %total_days, "Leave submitted");
        self.leaves.insert(leave.id, leave.clone());
        Ok(leave)
    }

    /// Records an admin decision on a pending request.
    ///
    /// # Errors
    ///
    /// - [`XtrackError::Validation`] if `status` is neither approved nor rejected
    /// - [`XtrackError::NotFound`] if `id` is unknown
    /// - [`XtrackError::InvalidTransition`] if the request is no longer pending
    pub fn update_status(&mut self, id: LeaveId, status: LeaveStatus) -> XtrackResult<LeaveRequest> {
        if !matches!(status, LeaveStatus::Approved | LeaveStatus::Rejected) {
            return Err(XtrackError::validation(
                "status",
                format!("an admin decision must be approved or rejected, got {}", status),
            ));
        }
        self.transition(id, status, |_| Ok(()))
    }

    /// Withdraws a pending request on behalf of its owner.
    ///
    /// # Errors
    ///
    /// - [`XtrackError::NotFound`] if `id` is unknown
    /// - [`XtrackError::Forbidden`] if `requester` does not own the request
    /// - [`XtrackError::InvalidTransition`] if the request is no longer pending
    pub fn cancel(&mut self, id: LeaveId, requester: EmployeeId) -> XtrackResult<LeaveRequest> {
        self.transition(id, LeaveStatus::Cancelled, |leave| {
            if leave.employee_id == requester {
                Ok(())
            } else {
                Err(XtrackError::Forbidden {
                    message: format!("leave request {} belongs to another employee", id),
                })
            }
        })
    }

    fn transition(
        &mut self,
        id: LeaveId,
        next: LeaveStatus,
        authorize: impl FnOnce(&LeaveRequest) -> XtrackResult<()>,
    ) -> XtrackResult<LeaveRequest> {
        let leave = self
            .leaves
            .get_mut(&id)
            .ok_or_else(|| XtrackError::not_found(ENTITY, id))?;

        authorize(leave)?;

        if !leave.status.can_transition_to(next) {
            return Err(XtrackError::InvalidTransition {
                id,
                from: leave.status,
                to: next,
            });
        }

        debug!(leave_id = id, from = %leave.status, to = %next, "Leave status changed");
        leave.status = next;
        Ok(leave.clone())
    }

    /// Returns a request by id.
    pub fn get(&self, id: LeaveId) -> XtrackResult<&LeaveRequest> {
        self.leaves
            .get(&id)
            .ok_or_else(|| XtrackError::not_found(ENTITY, id))
    }

    /// All requests of one employee.
    pub fn list_for_employee(&self, employee_id: EmployeeId) -> Vec<LeaveRequest> {
        self.leaves
            .values()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// Every request in the ledger.
    pub fn list_all(&self) -> Vec<LeaveRequest> {
        self.leaves.values().cloned().collect()
    }

    /// Every approved request.
    pub fn list_approved(&self) -> Vec<LeaveRequest> {
        self.leaves
            .values()
            .filter(|l| l.is_approved())
            .cloned()
            .collect()
    }

    /// Approved requests of one employee.
    pub fn approved_for_employee(&self, employee_id: EmployeeId) -> Vec<LeaveRequest> {
        self.leaves
            .values()
            .filter(|l| l.employee_id == employee_id && l.is_approved())
            .cloned()
            .collect()
    }
}
