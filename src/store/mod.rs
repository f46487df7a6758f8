//! In-memory systems of record.
//!
//! [`Store`] owns the employee directory, leave ledger, holiday registry and
//! attendance log. It is an ordinary value: callers decide how it is shared
//! (the HTTP layer wraps it in a read/write lock inside its state) and every
//! mutation goes through `&mut self`.

mod attendance_log;
mod employee_directory;
mod holiday_registry;
mod leave_ledger;

pub use attendance_log::{AttendanceFilter, AttendanceLog};
pub use employee_directory::EmployeeDirectory;
pub use holiday_registry::HolidayRegistry;
pub use leave_ledger::LeaveLedger;

use crate::models::Employee;

/// The complete mutable state of the service.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Employees and their base salaries.
    pub employees: EmployeeDirectory,
    /// Leave requests.
    pub leaves: LeaveLedger,
    /// Holiday calendar.
    pub holidays: HolidayRegistry,
    /// Daily attendance.
    pub attendance: AttendanceLog,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose directory starts with `employees`.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            employees: EmployeeDirectory::seeded(employees),
            ..Self::default()
        }
    }
}
