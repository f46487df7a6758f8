//! Holiday registry endpoints.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

use crate::api::auth::Caller;
use crate::api::request::CreateHolidayRequest;
use crate::api::response::{ApiErrorResponse, DataEnvelope};
use crate::api::state::AppState;
use crate::models::HolidayId;

use super::{json_body, path_param, reject, respond};

/// `GET /api/holidays`: every holiday, ordered by date.
pub(super) async fn list_holidays(
    State(state): State<AppState>,
    _caller: Caller,
) -> Result<Response, ApiErrorResponse> {
    let holidays = state.store().read().await.holidays.list();
    Ok(respond(StatusCode::OK, DataEnvelope::new(holidays)))
}

/// `POST /api/holidays` (admin).
pub(super) async fn create_holiday(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<CreateHolidayRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    caller.require_admin().map_err(reject(correlation_id))?;
    let date = request.parsed_date().map_err(reject(correlation_id))?;

    let holiday = state
        .store()
        .write()
        .await
        .holidays
        .create(&request.name, date, request.category)
        .map_err(reject(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        holiday_id = holiday.id,
        date = %holiday.date,
        "Holiday created"
    );
    Ok(respond(StatusCode::CREATED, DataEnvelope::new(holiday)))
}

/// `DELETE /api/holidays/{id}` (admin).
pub(super) async fn delete_holiday(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<HolidayId>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_param(correlation_id, id)?;
    caller.require_admin().map_err(reject(correlation_id))?;

    let holiday = state
        .store()
        .write()
        .await
        .holidays
        .delete(id)
        .map_err(reject(correlation_id))?;

    info!(correlation_id = %correlation_id, holiday_id = id, "Holiday deleted");
    Ok(respond(StatusCode::OK, DataEnvelope::new(holiday)))
}
