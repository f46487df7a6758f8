//! Request types for the Xtrack API.
//!
//! Bodies and query strings are deserialized leniently (strings for form
//! fields) and converted to domain types with field-specific validation
//! errors.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{XtrackError, XtrackResult};
use crate::models::{DayType, HolidayCategory, LeaveStatus, LeaveType, NewLeave, parse_time};

/// Request body for `POST /api/leaves`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeaveRequest {
    /// `vacation`, `sick`, `personal` or `urgent`.
    #[serde(default)]
    pub leave_type: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: String,
    /// `full` (default) or `half`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_type: Option<String>,
    /// `HH:MM`, half days only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// `HH:MM`, half days only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Why the leave is needed.
    #[serde(default)]
    pub reason: String,
}

impl TryFrom<SubmitLeaveRequest> for NewLeave {
    type Error = XtrackError;

    fn try_from(request: SubmitLeaveRequest) -> Result<Self, Self::Error> {
        let leave_type = required("leaveType", &request.leave_type)?.parse::<LeaveType>()?;
        let start_date = parse_date("startDate", &request.start_date)?;
        let end_date = parse_date("endDate", &request.end_date)?;

        let day_type = match request.day_type.as_deref().map(str::trim) {
            None | Some("") | Some("full") => DayType::Full,
            Some("half") => DayType::Half,
            Some(other) => {
                return Err(XtrackError::validation(
                    "dayType",
                    format!("unknown day type '{}'", other),
                ));
            }
        };

        Ok(NewLeave {
            leave_type,
            start_date,
            end_date,
            day_type,
            start_time: optional_time("startTime", request.start_time.as_deref())?,
            end_time: optional_time("endTime", request.end_time.as_deref())?,
            reason: request.reason,
        })
    }
}

fn required<'a>(field: &str, value: &'a str) -> XtrackResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(XtrackError::validation(field, "is required"))
    } else {
        Ok(value)
    }
}

fn parse_date(field: &str, value: &str) -> XtrackResult<NaiveDate> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| XtrackError::validation(field, format!("'{}' is not a YYYY-MM-DD date", value)))
}

fn optional_time(field: &str, value: Option<&str>) -> XtrackResult<Option<chrono::NaiveTime>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_time(text)
            .map(Some)
            .map_err(|message| XtrackError::validation(field, message)),
    }
}

/// Request body for `POST /api/leaves/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// `approved`/`rejected` (admin) or `cancelled` (owner).
    pub status: LeaveStatus,
}

/// Request body for `POST /api/holidays`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateHolidayRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    /// Category, `Public` when omitted.
    #[serde(default)]
    pub category: HolidayCategory,
}

impl CreateHolidayRequest {
    /// The parsed holiday date.
    pub fn parsed_date(&self) -> XtrackResult<NaiveDate> {
        parse_date("date", &self.date)
    }
}

/// Request body for `POST /api/create`.
///
/// The admin form posts every field as text, blanks included; numbers are
/// accepted for `salary` as well.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Monthly base salary.
    #[serde(default, deserialize_with = "lenient_text")]
    pub salary: String,
    /// First day of employment, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_on: Option<String>,
}

impl CreateEmployeeRequest {
    /// The parsed base salary.
    pub fn parsed_salary(&self) -> XtrackResult<Decimal> {
        let value = required("salary", &self.salary)?;
        value
            .parse::<Decimal>()
            .map_err(|_| XtrackError::validation("salary", format!("'{}' is not an amount", value)))
    }

    /// The parsed joining date; blank means unknown.
    pub fn parsed_joined_on(&self) -> XtrackResult<Option<NaiveDate>> {
        match self.joined_on.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_date("joinedOn", text).map(Some),
        }
    }
}

/// Accepts a JSON string, number or null as text.
fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(d)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

/// Query for `GET /api/salary/calculate`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SalaryQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

/// Query for `GET /api/calendar`: either `year`+`month` or `start`+`end`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CalendarQuery {
    /// Month grid year.
    pub year: Option<i32>,
    /// Month grid month.
    pub month: Option<u32>,
    /// Explicit range start.
    pub start: Option<NaiveDate>,
    /// Explicit range end.
    pub end: Option<NaiveDate>,
}

/// Query for `GET /api/leave-history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveHistoryQuery {
    /// Restrict to one `YYYY-MM` month.
    pub month: Option<String>,
}

/// Query for `GET /api/attendance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceQuery {
    /// Only records on this day.
    pub date: Option<NaiveDate>,
    /// Case-insensitive employee name filter.
    pub search: Option<String>,
}

/// Request body for check-in and check-out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PunchRequest {
    /// When the punch happened; now when omitted.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}
