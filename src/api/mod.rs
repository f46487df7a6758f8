//! HTTP API module for Xtrack.
//!
//! This module provides the REST endpoints for leave workflows, the
//! employee directory, salary aggregation, the holiday registry, the
//! calendar projection and attendance.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::Caller;
pub use handlers::create_router;
pub use request::{
    AttendanceQuery, CalendarQuery, CreateEmployeeRequest, CreateHolidayRequest,
    LeaveHistoryQuery, PunchRequest, SalaryQuery, StatusUpdateRequest, SubmitLeaveRequest,
};
pub use response::{ApiError, ApiErrorResponse, AttendanceView, DataEnvelope, LeaveView};
pub use state::AppState;
