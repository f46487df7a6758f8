//! Core data models for the Xtrack service.
//!
//! This module contains all the domain models used throughout the crate.

mod attendance;
mod calendar;
mod employee;
mod holiday;
mod leave;
mod salary;

/// Identifier of an employee.
pub type EmployeeId = u64;
/// Identifier of a leave request.
pub type LeaveId = u64;
/// Identifier of a holiday.
pub type HolidayId = u64;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use calendar::CalendarDay;
pub use employee::Employee;
pub use holiday::{Holiday, HolidayCategory};
pub use leave::{
    DayType, LeaveRequest, LeaveStatus, LeaveType, MAX_LEAVE_DAYS, NewLeave, count_leave_days,
    parse_time,
};
pub use salary::{LeaveHistoryRow, SalarySummary};
