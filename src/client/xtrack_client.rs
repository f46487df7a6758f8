//! Typed HTTP client for the Xtrack API.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{
    ApiError, AttendanceView, CreateEmployeeRequest, CreateHolidayRequest, DataEnvelope,
    LeaveView, PunchRequest, StatusUpdateRequest, SubmitLeaveRequest,
};
use crate::error::{XtrackError, XtrackResult};
use crate::models::{
    CalendarDay, Employee, Holiday, HolidayCategory, HolidayId, LeaveHistoryRow, LeaveId,
    LeaveRequest, LeaveStatus, SalarySummary,
};

use super::TokenStore;

/// Base URL used when the client runs on `localhost`.
pub const LOCAL_BASE_URL: &str = "http://localhost:4000";
/// Base URL used everywhere else.
pub const REMOTE_BASE_URL: &str = "https://xtrack.xvantageinfotech.com/api";

/// Picks the API base URL for the host the client runs on.
///
/// # Example
///
/// ```
/// use xtrack::client::{base_url_for_host, LOCAL_BASE_URL, REMOTE_BASE_URL};
///
/// assert_eq!(base_url_for_host("localhost"), LOCAL_BASE_URL);
/// assert_eq!(base_url_for_host("hr.example.com"), REMOTE_BASE_URL);
/// ```
pub fn base_url_for_host(hostname: &str) -> &'static str {
    if hostname == "localhost" {
        LOCAL_BASE_URL
    } else {
        REMOTE_BASE_URL
    }
}

/// Client for the Xtrack REST API.
///
/// Every request carries `Authorization: Bearer <token>` when a token is
/// set. Failures never retry: transport problems surface as
/// [`XtrackError::Network`], error responses as [`XtrackError::Rejected`].
#[derive(Debug, Clone)]
pub struct XtrackClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl XtrackClient {
    /// A client for `base_url` without a token.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// A client for the base URL matching `hostname`.
    pub fn for_hostname(hostname: &str) -> Self {
        Self::new(base_url_for_host(hostname))
    }

    /// A client using the token persisted in `store`, if any.
    pub fn from_token_store(base_url: impl Into<String>, store: &TokenStore) -> Self {
        let mut client = Self::new(base_url);
        client.token = store.load();
        client
    }

    /// Sets the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replaces or removes the bearer token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> XtrackResult<T> {
        let response = builder.send().await.map_err(|e| XtrackError::Network {
            message: e.to_string(),
        })?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Xtrack API responded");

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| XtrackError::Network {
                message: format!("invalid response body: {}", e),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ApiError>(&body) {
            Ok(error) => (error.code, error.message),
            Err(_) => ("HTTP_ERROR".to_string(), body),
        };
        warn!(status = status.as_u16(), code = %code, "Xtrack API rejected request");
        Err(XtrackError::Rejected {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> XtrackResult<T> {
        let envelope: DataEnvelope<T> = self.send(self.request(Method::GET, path)).await?;
        Ok(envelope.data)
    }

    async fn post_data<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> XtrackResult<T> {
        let envelope: DataEnvelope<T> = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Ok(envelope.data)
    }

    // Leaves

    /// The caller's own leave requests.
    pub async fn my_leaves(&self) -> XtrackResult<Vec<LeaveRequest>> {
        self.get_data("/api/leaves/me").await
    }

    /// Submits a leave request for the caller.
    pub async fn apply_leave(&self, request: &SubmitLeaveRequest) -> XtrackResult<LeaveRequest> {
        self.post_data("/api/leaves", request).await
    }

    /// Cancels one of the caller's pending requests.
    pub async fn cancel_leave(&self, id: LeaveId) -> XtrackResult<LeaveRequest> {
        self.set_leave_status(id, LeaveStatus::Cancelled).await
    }

    /// Approves or rejects a pending request (admin).
    pub async fn update_leave_status(
        &self,
        id: LeaveId,
        status: LeaveStatus,
    ) -> XtrackResult<LeaveRequest> {
        if !matches!(status, LeaveStatus::Approved | LeaveStatus::Rejected) {
            return Err(XtrackError::validation(
                "status",
                format!("admins can only approve or reject, not set {}", status),
            ));
        }
        self.set_leave_status(id, status).await
    }

    async fn set_leave_status(&self, id: LeaveId, status: LeaveStatus) -> XtrackResult<LeaveRequest> {
        self.post_data(
            &format!("/api/leaves/{}/status", id),
            &StatusUpdateRequest { status },
        )
        .await
    }

    /// All requests (admin) or approved requests (employee).
    pub async fn leaves(&self) -> XtrackResult<Vec<LeaveView>> {
        self.get_data("/api/leaves").await
    }

    /// Monthly leave usage (admin), optionally for one `YYYY-MM` month.
    pub async fn leave_history(&self, month: Option<&str>) -> XtrackResult<Vec<LeaveHistoryRow>> {
        let mut builder = self.request(Method::GET, "/api/leave-history");
        if let Some(month) = month {
            builder = builder.query(&[("month", month)]);
        }
        let envelope: DataEnvelope<Vec<LeaveHistoryRow>> = self.send(builder).await?;
        Ok(envelope.data)
    }

    // Employees and salary

    /// The employee directory (admin).
    pub async fn employees(&self) -> XtrackResult<Vec<Employee>> {
        self.send(self.request(Method::GET, "/api/getemployee")).await
    }

    /// Adds an employee (admin).
    pub async fn create_employee(&self, request: &CreateEmployeeRequest) -> XtrackResult<Employee> {
        self.send(self.request(Method::POST, "/api/create").json(request))
            .await
    }

    /// Salary summaries for a month (admin).
    pub async fn salary(&self, year: i32, month: u32) -> XtrackResult<Vec<SalarySummary>> {
        self.send(
            self.request(Method::GET, "/api/salary/calculate")
                .query(&[("year", year.to_string()), ("month", month.to_string())]),
        )
        .await
    }

    // Holidays and calendar

    /// Every holiday.
    pub async fn holidays(&self) -> XtrackResult<Vec<Holiday>> {
        self.get_data("/api/holidays").await
    }

    /// Adds a holiday (admin).
    pub async fn create_holiday(
        &self,
        name: &str,
        date: NaiveDate,
        category: HolidayCategory,
    ) -> XtrackResult<Holiday> {
        let request = CreateHolidayRequest {
            name: name.to_string(),
            date: date.to_string(),
            category,
        };
        self.post_data("/api/holidays", &request).await
    }

    /// Removes a holiday (admin).
    pub async fn delete_holiday(&self, id: HolidayId) -> XtrackResult<Holiday> {
        let envelope: DataEnvelope<Holiday> = self
            .send(self.request(Method::DELETE, &format!("/api/holidays/{}", id)))
            .await?;
        Ok(envelope.data)
    }

    /// The padded month grid for `year`/`month`.
    pub async fn month_calendar(&self, year: i32, month: u32) -> XtrackResult<Vec<CalendarDay>> {
        let builder = self
            .request(Method::GET, "/api/calendar")
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        let envelope: DataEnvelope<Vec<CalendarDay>> = self.send(builder).await?;
        Ok(envelope.data)
    }

    /// The calendar between `start` and `end`, both inclusive.
    pub async fn calendar_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> XtrackResult<Vec<CalendarDay>> {
        let builder = self
            .request(Method::GET, "/api/calendar")
            .query(&[("start", start.to_string()), ("end", end.to_string())]);
        let envelope: DataEnvelope<Vec<CalendarDay>> = self.send(builder).await?;
        Ok(envelope.data)
    }

    // Attendance

    /// Attendance records (admin), filtered by day and employee name.
    pub async fn attendance(
        &self,
        date: Option<NaiveDate>,
        search: Option<&str>,
    ) -> XtrackResult<Vec<AttendanceView>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(date) = date {
            query.push(("date", date.to_string()));
        }
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        let builder = self.request(Method::GET, "/api/attendance").query(&query);
        let envelope: DataEnvelope<Vec<AttendanceView>> = self.send(builder).await?;
        Ok(envelope.data)
    }

    /// The caller's own attendance.
    pub async fn my_attendance(&self) -> XtrackResult<Vec<AttendanceView>> {
        self.get_data("/api/attendance/me").await
    }

    /// Checks the caller in, now or at `at`.
    pub async fn check_in(&self, at: Option<NaiveDateTime>) -> XtrackResult<AttendanceView> {
        self.post_data("/api/attendance/check-in", &PunchRequest { at })
            .await
    }

    /// Checks the caller out, now or at `at`.
    pub async fn check_out(&self, at: Option<NaiveDateTime>) -> XtrackResult<AttendanceView> {
        self.post_data("/api/attendance/check-out", &PunchRequest { at })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = XtrackClient::new("http://localhost:4000/");
        assert_eq!(client.base_url(), "http://localhost:4000");
    }

    #[test]
    fn test_for_hostname_picks_base_url() {
        assert_eq!(XtrackClient::for_hostname("localhost").base_url(), LOCAL_BASE_URL);
        assert_eq!(XtrackClient::for_hostname("xtrack.example").base_url(), REMOTE_BASE_URL);
    }

    #[test]
    fn test_set_token_replaces_and_clears() {
        let mut client = XtrackClient::new(LOCAL_BASE_URL).with_token("first");
        client.set_token(Some("second".to_string()));
        assert_eq!(client.token.as_deref(), Some("second"));
        client.set_token(None);
        assert!(client.token.is_none());
    }

    #[tokio::test]
    async fn test_update_status_rejects_cancel_locally() {
        let client = XtrackClient::new(LOCAL_BASE_URL);
        let result = client.update_leave_status(1, LeaveStatus::Cancelled).await;
        assert!(matches!(result, Err(XtrackError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on test machines
        let client = XtrackClient::new("http://127.0.0.1:9").with_token("dev-admin-token");
        let result = client.holidays().await;
        assert!(matches!(result, Err(XtrackError::Network { .. })));
    }
}
