//! HTTP request handlers for the HR engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::attendance::{AttendanceRow, AttendanceSummary, attendance_rows, summarize_attendance};
use crate::error::EngineResult;
use crate::hierarchy::build_from_store;
use crate::leave::run_monthly_allocation;
use crate::models::DateRange;
use crate::payroll::payroll_from_store;

use super::request::{PunchInRequest, SummaryQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/hierarchy", get(hierarchy_handler))
        .route("/leave/allocations", post(allocation_handler))
        .route("/attendance/summary", get(summary_handler))
        .route("/attendance/:employee_id/status", get(status_handler))
        .route(
            "/attendance/:employee_id/punch-in",
            post(punch_in_handler).delete(undo_punch_in_handler),
        )
        .route("/attendance/:employee_id/punch-out", post(punch_out_handler))
        .route("/payroll/:year/:month", get(payroll_handler))
        .with_state(state)
}

/// Body of `GET /attendance/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSummaryResponse {
    /// The inclusive window that was summarised.
    pub range: DateRange,
    /// Per-employee totals.
    pub summaries: Vec<AttendanceSummary>,
    /// Every record in the window, one row each.
    pub rows: Vec<AttendanceRow>,
}

/// Turns an engine result into a JSON response, logging the outcome.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = started.elapsed().as_micros(),
                "Request completed successfully"
            );
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn reject(correlation_id: Uuid, operation: &'static str, error: ApiError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %error.message,
        "Request rejected"
    );
    ApiErrorResponse::bad_request(error).into_response()
}

/// Handler for GET /hierarchy.
async fn hierarchy_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, "Building hierarchy");

    respond(
        correlation_id,
        "hierarchy",
        started,
        build_from_store(state.store()),
    )
}

/// Handler for POST /leave/allocations.
///
/// Runs the allocation for the current month; repeated calls in the same
/// month report every employee as skipped.
async fn allocation_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let today = state.today();
    info!(correlation_id = %correlation_id, today = %today, "Running monthly leave allocation");

    respond(
        correlation_id,
        "leave_allocation",
        started,
        run_monthly_allocation(state.store(), today),
    )
}

/// Handler for GET /attendance/{employee_id}/status.
async fn status_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();

    respond(
        correlation_id,
        "attendance_status",
        started,
        state.attendance().status(&employee_id, Utc::now()),
    )
}

/// Handler for POST /attendance/{employee_id}/punch-in.
///
/// The body is optional; when present it must be a [`PunchInRequest`].
async fn punch_in_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing punch-in");

    let request = if body.iter().all(u8::is_ascii_whitespace) {
        PunchInRequest::default()
    } else {
        match serde_json::from_slice::<PunchInRequest>(&body) {
            Ok(request) => request,
            Err(err) => {
                return reject(
                    correlation_id,
                    "punch_in",
                    ApiError::malformed_json(format!("Invalid punch-in body: {}", err)),
                );
            }
        }
    };

    let location = match request.reported_location() {
        Ok(location) => location,
        Err(err) => {
            return respond::<()>(correlation_id, "punch_in", started, Err(err));
        }
    };

    let result = state
        .attendance()
        .punch_in(&employee_id, &location, Utc::now())
        .await;
    respond(correlation_id, "punch_in", started, result)
}

/// Handler for POST /attendance/{employee_id}/punch-out.
async fn punch_out_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing punch-out");

    let result = state.attendance().punch_out(&employee_id, Utc::now()).await;
    respond(correlation_id, "punch_out", started, result)
}

/// Handler for DELETE /attendance/{employee_id}/punch-in.
async fn undo_punch_in_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Undoing punch-in");

    let result = state
        .attendance()
        .undo_punch_in(&employee_id, Utc::now())
        .await;
    respond(correlation_id, "undo_punch_in", started, result)
}

/// Handler for GET /attendance/summary?start=&end=.
async fn summary_handler(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return reject(
                correlation_id,
                "attendance_summary",
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    let result = query.range().and_then(|range| {
        let records = state.store().list_attendance_records()?;
        Ok(AttendanceSummaryResponse {
            range,
            summaries: summarize_attendance(&records, &range),
            rows: attendance_rows(&records, &range),
        })
    });
    respond(correlation_id, "attendance_summary", started, result)
}

/// Handler for GET /payroll/{year}/{month}.
async fn payroll_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();

    let (year, month) = match path {
        Ok(Path(period)) => period,
        Err(rejection) => {
            return reject(
                correlation_id,
                "payroll",
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };
    info!(correlation_id = %correlation_id, year, month, "Calculating payroll");

    respond(
        correlation_id,
        "payroll",
        started,
        payroll_from_store(state.store(), year, month),
    )
}
