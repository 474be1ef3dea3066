//! Notification history routes.

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use uuid::Uuid;

use chainletter_common::error::AppError;
use chainletter_common::types::Report;
use chainletter_store::reports::{CreateReportParams, UpdateReportParams};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reports", get(list_reports))
        .route("/api/reports", post(create_report))
        .route("/api/reports/{id}", patch(update_report))
}

/// GET /api/reports — List the notification history, newest first.
async fn list_reports(State(state): State<AppState>) -> Json<Vec<Report>> {
    Json(state.store.list_reports())
}

/// POST /api/reports — Record a compiled notification.
async fn create_report(
    State(state): State<AppState>,
    Json(params): Json<CreateReportParams>,
) -> Result<Json<Report>, AppError> {
    let report = state.store.create_report(params)?;
    Ok(Json(report))
}

/// PATCH /api/reports/:id — Update a report's lifecycle status.
async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateReportParams>,
) -> Result<Json<Report>, AppError> {
    let report = state.store.update_report(id, params)?;
    Ok(Json(report))
}
