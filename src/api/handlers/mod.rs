//! HTTP request handlers for the Xtrack API.
//!
//! Handlers are grouped by area. Each one tags its log lines with a fresh
//! correlation id, resolves the [`Caller`](super::auth::Caller), takes the
//! store lock for a single operation and answers with JSON.

mod attendance;
mod calendar;
mod employees;
mod holidays;
mod leaves;
mod salary;

use axum::{
    Json, Router,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::XtrackError;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/leaves", get(leaves::list_leaves).post(leaves::submit_leave))
        .route("/api/leaves/me", get(leaves::my_leaves))
        .route("/api/leaves/:id/status", post(leaves::update_leave_status))
        .route("/api/leave-history", get(leaves::leave_history))
        .route("/api/getemployee", get(employees::list_employees))
        .route("/api/create", post(employees::create_employee))
        .route("/api/salary/calculate", get(salary::calculate_salaries))
        .route(
            "/api/holidays",
            get(holidays::list_holidays).post(holidays::create_holiday),
        )
        .route("/api/holidays/:id", delete(holidays::delete_holiday))
        .route("/api/calendar", get(calendar::calendar))
        .route("/api/attendance", get(attendance::list_attendance))
        .route("/api/attendance/me", get(attendance::my_attendance))
        .route("/api/attendance/check-in", post(attendance::check_in))
        .route("/api/attendance/check-out", post(attendance::check_out))
        .with_state(state)
}

/// Serializes `body` as a JSON response.
fn respond<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs a failed request and converts the error into a response.
fn reject(correlation_id: Uuid) -> impl Fn(XtrackError) -> ApiErrorResponse {
    move |error| {
        warn!(correlation_id = %correlation_id, error = %error, "Request failed");
        error.into()
    }
}

/// Unwraps a path parameter, mapping extractor rejections to API errors.
fn path_param<T>(
    correlation_id: Uuid,
    param: Result<Path<T>, PathRejection>,
) -> Result<T, ApiErrorResponse> {
    param.map(|Path(value)| value).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameter");
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Unwraps a JSON body, mapping extractor rejections to API errors.
fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message is only available through the body text
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}
