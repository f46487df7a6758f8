//! Employee directory endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

use crate::api::auth::Caller;
use crate::api::request::CreateEmployeeRequest;
use crate::api::response::ApiErrorResponse;
use crate::api::state::AppState;

use super::{json_body, reject, respond};

/// `GET /api/getemployee` (admin): bare array ordered by id.
pub(super) async fn list_employees(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    caller.require_admin().map_err(reject(correlation_id))?;

    let employees = state.store().read().await.employees.list();
    info!(correlation_id = %correlation_id, count = employees.len(), "Listed employees");
    Ok(respond(StatusCode::OK, employees))
}

/// `POST /api/create` (admin).
pub(super) async fn create_employee(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    caller.require_admin().map_err(reject(correlation_id))?;
    let salary = request.parsed_salary().map_err(reject(correlation_id))?;
    let joined_on = request.parsed_joined_on().map_err(reject(correlation_id))?;

    let employee = state
        .store()
        .write()
        .await
        .employees
        .create(&request.name, salary, joined_on)
        .map_err(reject(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = employee.id,
        "Employee created"
    );
    Ok(respond(StatusCode::CREATED, employee))
}
