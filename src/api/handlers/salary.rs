//! Salary aggregation endpoint.

use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

use crate::api::auth::Caller;
use crate::api::request::SalaryQuery;
use crate::api::response::ApiErrorResponse;
use crate::api::state::AppState;
use crate::calculation::calculate_payroll;

use super::{reject, respond};

/// `GET /api/salary/calculate?year&month` (admin): bare array, one row per
/// employee employed in the month.
pub(super) async fn calculate_salaries(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<SalaryQuery>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        year = query.year,
        month = query.month,
        "Processing salary calculation"
    );
    caller.require_admin().map_err(reject(correlation_id))?;

    let start_time = Instant::now();
    let store = state.store().read().await;
    let summaries = calculate_payroll(
        &store.employees.list(),
        query.year,
        query.month,
        &store.holidays.list(),
        &store.leaves.list_approved(),
        state.config().payroll(),
    )
    .map_err(reject(correlation_id))?;

    info!(
        correlation_id = %correlation_id,
        rows = summaries.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Salary calculation completed"
    );
    Ok(respond(StatusCode::OK, summaries))
}
