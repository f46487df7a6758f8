//! Attendance endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::{Local, NaiveDateTime};
use tracing::info;
use uuid::Uuid;

use crate::api::auth::Caller;
use crate::api::request::{AttendanceQuery, PunchRequest};
use crate::api::response::{ApiErrorResponse, AttendanceView, DataEnvelope};
use crate::api::state::AppState;
use crate::models::AttendanceRecord;
use crate::store::{AttendanceFilter, Store};

use super::{reject, respond};

fn views(store: &Store, records: Vec<AttendanceRecord>) -> Vec<AttendanceView> {
    records
        .into_iter()
        .map(|record| {
            let name = store.employees.name_of(record.employee_id).map(str::to_string);
            AttendanceView::new(record, name)
        })
        .collect()
}

fn punch_time(payload: Option<Json<PunchRequest>>) -> NaiveDateTime {
    payload
        .and_then(|Json(request)| request.at)
        .unwrap_or_else(|| Local::now().naive_local())
}

/// `GET /api/attendance[?date&search]` (admin).
pub(super) async fn list_attendance(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<AttendanceQuery>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    caller.require_admin().map_err(reject(correlation_id))?;

    let store = state.store().read().await;
    let employee_ids = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|search| {
            let needle = search.to_lowercase();
            store
                .employees
                .list()
                .into_iter()
                .filter(|e| e.name.to_lowercase().contains(&needle))
                .map(|e| e.id)
                .collect::<Vec<_>>()
        });

    let filter = AttendanceFilter {
        date: query.date,
        employee_ids,
    };
    let records = views(&store, store.attendance.list(&filter));
    info!(correlation_id = %correlation_id, count = records.len(), "Listed attendance");
    Ok(respond(StatusCode::OK, DataEnvelope::new(records)))
}

/// `GET /api/attendance/me`.
pub(super) async fn my_attendance(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let employee_id = caller.require_employee().map_err(reject(correlation_id))?;

    let store = state.store().read().await;
    let records = views(&store, store.attendance.for_employee(employee_id));
    Ok(respond(StatusCode::OK, DataEnvelope::new(records)))
}

/// `POST /api/attendance/check-in`, body `{ "at"? }`.
pub(super) async fn check_in(
    State(state): State<AppState>,
    caller: Caller,
    payload: Option<Json<PunchRequest>>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let employee_id = caller.require_employee().map_err(reject(correlation_id))?;
    let at = punch_time(payload);

    let mut store = state.store().write().await;
    let record = store.attendance.check_in(employee_id, at);
    info!(correlation_id = %correlation_id, employee_id, at = %at, "Checked in");

    let name = store.employees.name_of(employee_id).map(str::to_string);
    Ok(respond(StatusCode::OK, DataEnvelope::new(AttendanceView::new(record, name))))
}

/// `POST /api/attendance/check-out`, body `{ "at"? }`.
pub(super) async fn check_out(
    State(state): State<AppState>,
    caller: Caller,
    payload: Option<Json<PunchRequest>>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let employee_id = caller.require_employee().map_err(reject(correlation_id))?;
    let at = punch_time(payload);

    let mut store = state.store().write().await;
    let record = store
        .attendance
        .check_out(employee_id, at)
        .map_err(reject(correlation_id))?;
    info!(
        correlation_id = %correlation_id,
        employee_id,
        hours = %record.total_hours,
        "Checked out"
    );

    let name = store.employees.name_of(employee_id).map(str::to_string);
    Ok(respond(StatusCode::OK, DataEnvelope::new(AttendanceView::new(record, name))))
}
