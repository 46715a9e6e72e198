//! HTTP request handlers for the HRMS leave API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{preview_leave_request, summarize_balances};
use crate::error::EngineError;
use crate::report::{ReportPayload, render_evaluation_report};

use super::request::{BalanceRequest, PreviewRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/leave-types", get(leave_types_handler))
        .route("/leave-requests/preview", post(preview_handler))
        .route("/leave-balances", post(balances_handler))
        .route("/reports/manager-evaluations", post(evaluation_report_handler))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler for GET /leave-types.
async fn leave_types_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config().catalog().leave_types().to_vec())
}

/// Maps a body that failed to parse to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Leave evaluation refused"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /leave-requests/preview.
///
/// Runs every leave rule against the application and returns the preview,
/// or the first refusal.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave preview request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let start_time = Instant::now();
    match preview_leave_request(
        &request.employee,
        &request.application,
        &request.history,
        as_of,
        state.config(),
    ) {
        Ok(preview) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee.id,
                leave_type = %request.application.leave_type,
                requested_days = %preview.breakdown.requested_days,
                with_pay_days = %preview.breakdown.with_pay_days,
                duration_us = start_time.elapsed().as_micros(),
                "Leave preview completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(preview),
            )
                .into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /leave-balances.
async fn balances_handler(
    State(state): State<AppState>,
    payload: Result<Json<BalanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    match summarize_balances(&request.employee, &request.history, as_of, state.config()) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee.id,
                year = summary.year,
                "Leave balances summarized"
            );
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /reports/manager-evaluations.
///
/// Renders the posted payload as an HTML document ready for PDF export.
async fn evaluation_report_handler(payload: Result<Json<ReportPayload>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let report = match payload {
        Ok(Json(report)) => report,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let html = render_evaluation_report(&report);
    info!(
        correlation_id = %correlation_id,
        records = report.evaluations.len(),
        bytes = html.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Evaluation report rendered"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response()
}
