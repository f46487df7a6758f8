//! Calendar projection endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use uuid::Uuid;

use crate::api::auth::Caller;
use crate::api::request::CalendarQuery;
use crate::api::response::{ApiErrorResponse, DataEnvelope};
use crate::api::state::AppState;
use crate::calculation::{month_view_range, project_calendar};
use crate::error::{XtrackError, XtrackResult};

use super::{reject, respond};

fn resolve_range(query: &CalendarQuery) -> XtrackResult<(chrono::NaiveDate, chrono::NaiveDate)> {
    match *query {
        CalendarQuery {
            year: Some(year),
            month: Some(month),
            ..
        } => month_view_range(year, month),
        CalendarQuery {
            start: Some(start),
            end: Some(end),
            ..
        } => Ok((start, end)),
        _ => Err(XtrackError::validation(
            "year",
            "either year and month or start and end are required",
        )),
    }
}

/// `GET /api/calendar?year&month` or `?start&end`.
///
/// A month request covers whole Sunday-to-Saturday weeks around the month.
pub(super) async fn calendar(
    State(state): State<AppState>,
    _caller: Caller,
    Query(query): Query<CalendarQuery>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let (start, end) = resolve_range(&query).map_err(reject(correlation_id))?;

    let store = state.store().read().await;
    let days = project_calendar(
        start,
        end,
        &store.holidays.in_range(start, end),
        &store.leaves.list_approved(),
    )
    .map_err(reject(correlation_id))?;

    tracing::debug!(
        correlation_id = %correlation_id,
        start = %start,
        end = %end,
        "Calendar projected"
    );
    Ok(respond(StatusCode::OK, DataEnvelope::new(days)))
}
