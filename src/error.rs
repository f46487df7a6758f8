//! Error types for the Xtrack HR service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the ledgers, registries, calculators, HTTP layer and
//! HTTP client can report.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EmployeeId, LeaveStatus};

/// The main error type for the Xtrack service.
///
/// All operations in the crate return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use xtrack::error::XtrackError;
///
/// let error = XtrackError::Validation {
///     field: "reason".to_string(),
///     message: "must not be blank".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'reason': must not be blank");
/// ```
#[derive(Debug, Error)]
pub enum XtrackError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required field was blank or a value was out of range.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity ("leave request", "holiday", ...).
        entity: String,
        /// The identifier that was looked up.
        id: u64,
    },

    /// A leave request status change that the lifecycle does not allow.
    #[error("Leave request {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The leave request id.
        id: u64,
        /// The status the request currently has.
        from: LeaveStatus,
        /// The status that was requested.
        to: LeaveStatus,
    },

    /// The caller is authenticated but not allowed to perform the action.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Why the action was refused.
        message: String,
    },

    /// The caller could not be identified.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Why identification failed.
        message: String,
    },

    /// An attendance record already exists for the employee and day.
    #[error("Attendance already recorded for employee {employee_id} on {date}")]
    DuplicateAttendance {
        /// The employee.
        employee_id: EmployeeId,
        /// The day that is already recorded.
        date: NaiveDate,
    },

    /// A request to the Xtrack API could not be completed.
    #[error("Network error: {message}")]
    Network {
        /// A description of the transport failure.
        message: String,
    },

    /// The Xtrack API answered with an error response.
    #[error("Request rejected with status {status} ({code}): {message}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The API error code.
        code: String,
        /// The API error message.
        message: String,
    },

    /// The persisted client token could not be written or removed.
    #[error("Token file '{path}' could not be updated: {message}")]
    TokenStore {
        /// The token file.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl XtrackError {
    /// Shorthand for a [`XtrackError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`XtrackError::NotFound`] error.
    pub fn not_found(entity: impl Into<String>, id: u64) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id,
        }
    }
}

/// A type alias for Results that return XtrackError.
pub type XtrackResult<T> = Result<T, XtrackError>;
