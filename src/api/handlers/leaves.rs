//! Leave request and leave history endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

use crate::api::auth::Caller;
use crate::api::request::{LeaveHistoryQuery, StatusUpdateRequest, SubmitLeaveRequest};
use crate::api::response::{ApiErrorResponse, DataEnvelope, LeaveView};
use crate::api::state::AppState;
use crate::calculation::{parse_month_key, summarize_leave_history};
use crate::models::{LeaveId, LeaveRequest, LeaveStatus, NewLeave};
use crate::store::Store;

use super::{json_body, path_param, reject, respond};

fn with_names(store: &Store, leaves: Vec<LeaveRequest>) -> Vec<LeaveView> {
    leaves
        .into_iter()
        .map(|leave| LeaveView {
            employee_name: store.employees.name_of(leave.employee_id).map(str::to_string),
            leave,
        })
        .collect()
}

/// `GET /api/leaves/me`: the caller's own requests.
pub(super) async fn my_leaves(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let employee_id = caller.require_employee().map_err(reject(correlation_id))?;

    let leaves = state.store().read().await.leaves.list_for_employee(employee_id);
    info!(
        correlation_id = %correlation_id,
        employee_id,
        count = leaves.len(),
        "Listed own leave requests"
    );
    Ok(respond(StatusCode::OK, DataEnvelope::new(leaves)))
}

/// `GET /api/leaves`: every request for admins, approved ones for employees.
pub(super) async fn list_leaves(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();

    let store = state.store().read().await;
    let leaves = if caller.is_admin() {
        store.leaves.list_all()
    } else {
        store.leaves.list_approved()
    };
    let views = with_names(&store, leaves);
    info!(
        correlation_id = %correlation_id,
        admin = caller.is_admin(),
        count = views.len(),
        "Listed leave requests"
    );
    Ok(respond(StatusCode::OK, DataEnvelope::new(views)))
}

/// `POST /api/leaves`: submits a new request for the caller.
pub(super) async fn submit_leave(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<SubmitLeaveRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave submission");

    let request = json_body(correlation_id, payload)?;
    let employee_id = caller.require_employee().map_err(reject(correlation_id))?;
    let new_leave = NewLeave::try_from(request).map_err(reject(correlation_id))?;

    let leave = state
        .store()
        .write()
        .await
        .leaves
        .submit(employee_id, new_leave)
        .map_err(reject(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        leave_id = leave.id,
        employee_id,
        leave_type = %leave.leave_type,
        total_days = %leave.total_days,
        "Leave request submitted"
    );
    Ok(respond(StatusCode::CREATED, DataEnvelope::new(leave)))
}

/// `POST /api/leaves/{id}/status`.
///
/// `cancelled` is an owner cancel; `approved` and `rejected` are admin
/// decisions.
pub(super) async fn update_leave_status(
    State(state): State<AppState>,
    caller: Caller,
    id: Result<Path<LeaveId>, PathRejection>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_param(correlation_id, id)?;
    info!(correlation_id = %correlation_id, leave_id = id, "Processing leave status change");

    let request = json_body(correlation_id, payload)?;

    let leave = if request.status == LeaveStatus::Cancelled {
        let employee_id = caller.require_employee().map_err(reject(correlation_id))?;
        state.store().write().await.leaves.cancel(id, employee_id)
    } else {
        caller.require_admin().map_err(reject(correlation_id))?;
        state.store().write().await.leaves.update_status(id, request.status)
    }
    .map_err(reject(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        leave_id = id,
        status = %leave.status,
        "Leave request status changed"
    );
    Ok(respond(StatusCode::OK, DataEnvelope::new(leave)))
}

/// `GET /api/leave-history[?month=YYYY-MM]` (admin).
pub(super) async fn leave_history(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<LeaveHistoryQuery>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    caller.require_admin().map_err(reject(correlation_id))?;

    let only_month = query
        .month
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .map(parse_month_key)
        .transpose()
        .map_err(reject(correlation_id))?;

    let store = state.store().read().await;
    let rows = summarize_leave_history(
        &store.employees.list(),
        &store.leaves.list_all(),
        &store.holidays.list(),
        state.config().payroll(),
        only_month,
    )
    .map_err(reject(correlation_id))?;

    info!(correlation_id = %correlation_id, rows = rows.len(), "Leave history summarised");
    Ok(respond(StatusCode::OK, DataEnvelope::new(rows)))
}
