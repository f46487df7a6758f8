//! Leave request model and its status lifecycle.
//!
//! A [`LeaveRequest`] is created `pending` by an employee, then either
//! decided by an admin (`approved`/`rejected`) or withdrawn by its owner
//! (`cancelled`). Every state other than `pending` is terminal.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{XtrackError, XtrackResult};

use super::{EmployeeId, LeaveId};

/// The kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Planned time off.
    Vacation,
    /// Sick leave.
    Sick,
    /// Personal leave.
    Personal,
    /// Short-notice leave for urgent matters.
    Urgent,
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Vacation => write!(f, "vacation"),
            LeaveType::Sick => write!(f, "sick"),
            LeaveType::Personal => write!(f, "personal"),
            LeaveType::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for LeaveType {
    type Err = XtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vacation" => Ok(LeaveType::Vacation),
            "sick" => Ok(LeaveType::Sick),
            "personal" => Ok(LeaveType::Personal),
            "urgent" => Ok(LeaveType::Urgent),
            other => Err(XtrackError::validation(
                "leaveType",
                format!("unknown leave type '{}'", other),
            )),
        }
    }
}

/// Whether a leave covers whole days or a half day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// One or more whole days.
    #[default]
    Full,
    /// Half a day, bounded by a start and end time.
    Half,
}

/// The lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Approved by an admin.
    Approved,
    /// Rejected by an admin.
    Rejected,
    /// Withdrawn by the owning employee.
    Cancelled,
}

impl LeaveStatus {
    /// Returns true when no further transition is possible.
    pub fn is_terminal(self) -> bool {
        self != LeaveStatus::Pending
    }

    /// Returns true if the lifecycle allows moving from `self` to `next`.
    ///
    /// # Example
    ///
    /// ```
    /// use xtrack::models::LeaveStatus;
    ///
    /// assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Approved));
    /// assert!(!LeaveStatus::Approved.can_transition_to(LeaveStatus::Cancelled));
    /// ```
    pub fn can_transition_to(self, next: LeaveStatus) -> bool {
        self == LeaveStatus::Pending && next != LeaveStatus::Pending
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
            LeaveStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A leave request held by the leave ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    /// Ledger-assigned identifier.
    pub id: LeaveId,
    /// The employee who requested the leave.
    pub employee_id: EmployeeId,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Full or half day.
    pub day_type: DayType,
    /// Start time of a half-day leave.
    #[serde(default, with = "hh_mm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    /// End time of a half-day leave.
    #[serde(default, with = "hh_mm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    /// Number of leave days requested (0.5 for a half day).
    pub total_days: Decimal,
    /// Free-text reason given by the employee.
    pub reason: String,
    /// Current lifecycle state.
    pub status: LeaveStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Returns true if the request has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Checks whether `date` falls inside the leave, both ends inclusive.
    ///
    /// Comparison is by calendar day, so half-day leaves cover their whole
    /// start..=end range just like full-day leaves.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates over every calendar day covered by the leave.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }
}

/// Longest leave, in days, a single request may cover.
pub const MAX_LEAVE_DAYS: i64 = 366;

/// A validated-on-submit description of a new leave request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLeave {
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Full or half day.
    pub day_type: DayType,
    /// Start time, required for half days.
    pub start_time: Option<NaiveTime>,
    /// End time, required for half days.
    pub end_time: Option<NaiveTime>,
    /// Reason for the leave.
    pub reason: String,
}

impl NewLeave {
    /// Validates the request and returns the number of leave days it covers.
    ///
    /// # Errors
    ///
    /// Returns [`XtrackError::Validation`] when the reason is blank, the end
    /// date precedes the start date, the leave spans more than
    /// [`MAX_LEAVE_DAYS`] days, or a half day is missing (or has an inverted)
    /// time window.
    pub fn validate(&self) -> XtrackResult<Decimal> {
        if self.reason.trim().is_empty() {
            return Err(XtrackError::validation("reason", "must not be blank"));
        }
        if self.end_date < self.start_date {
            return Err(XtrackError::validation(
                "endDate",
                format!(
                    "{} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        let span = (self.end_date - self.start_date).num_days() + 1;
        if span > MAX_LEAVE_DAYS {
            return Err(XtrackError::validation(
                "endDate",
                format!("leave of {} days exceeds {} days", span, MAX_LEAVE_DAYS),
            ));
        }
        if self.day_type == DayType::Half {
            let start = self
                .start_time
                .ok_or_else(|| XtrackError::validation("startTime", "required for a half day"))?;
            let end = self
                .end_time
                .ok_or_else(|| XtrackError::validation("endTime", "required for a half day"))?;
            if end <= start {
                return Err(XtrackError::validation(
                    "endTime",
                    format!("{} is not after start time {}", end.format("%H:%M"), start.format("%H:%M")),
                ));
            }
        }
        Ok(count_leave_days(self.start_date, self.end_date, self.day_type))
    }
}

/// Counts the leave days a request covers.
///
/// A half day is always 0.5 regardless of the date span; full days count
/// every calendar day from start to end inclusive.
///
/// # Example
///
/// ```
/// use xtrack::models::{count_leave_days, DayType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
/// assert_eq!(count_leave_days(start, end, DayType::Full), Decimal::from(3));
/// assert_eq!(count_leave_days(start, end, DayType::Half), Decimal::new(5, 1));
/// ```
pub fn count_leave_days(start: NaiveDate, end: NaiveDate, day_type: DayType) -> Decimal {
    match day_type {
        DayType::Half => Decimal::new(5, 1),
        DayType::Full => Decimal::from((end - start).num_days() + 1),
    }
}

/// Serde adapter for optional `HH:MM` times as sent by HTML time inputs.
pub(crate) mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => super::parse_time(text)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Parses a `HH:MM` or `HH:MM:SS` time of day.
pub fn parse_time(text: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|e| format!("invalid time '{}': {}", text, e))
}
