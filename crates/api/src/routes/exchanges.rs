//! Exchange contact book CRUD routes.

use std::fs;

use axum::extract::{Path, State};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use chainletter_common::error::AppError;
use chainletter_common::types::Exchange;
use chainletter_store::exchanges::{CreateExchangeParams, UpdateExchangeParams};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/exchanges", get(list_exchanges))
        .route("/api/exchanges", post(create_exchange))
        .route("/api/exchanges/seed", post(seed_exchanges))
        .route("/api/exchanges/{id}", patch(update_exchange))
        .route("/api/exchanges/{id}", delete(delete_exchange))
}

/// Shape of the configured seed file.
#[derive(Debug, Deserialize)]
struct SeedFile {
    exchanges: Vec<CreateExchangeParams>,
}

/// GET /api/exchanges — List the exchange contact book.
async fn list_exchanges(State(state): State<AppState>) -> Json<Vec<Exchange>> {
    Json(state.store.list_exchanges())
}

/// POST /api/exchanges — Add an exchange contact.
async fn create_exchange(
    State(state): State<AppState>,
    Json(params): Json<CreateExchangeParams>,
) -> Result<Json<Exchange>, AppError> {
    let exchange = state.store.create_exchange(params)?;
    Ok(Json(exchange))
}

/// PATCH /api/exchanges/:id — Partially update an exchange contact.
async fn update_exchange(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateExchangeParams>,
) -> Result<Json<Exchange>, AppError> {
    let exchange = state.store.update_exchange(id, params)?;
    Ok(Json(exchange))
}

/// DELETE /api/exchanges/:id — Remove an exchange contact.
async fn delete_exchange(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if state.store.delete_exchange(id)? {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(AppError::NotFound(format!("Exchange {} not found", id)))
    }
}

/// POST /api/exchanges/seed — Replace the contact book from the seed file.
async fn seed_exchanges(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let path = state.config.exchange_seed_file.as_ref().ok_or_else(|| {
        AppError::Validation("EXCHANGE_SEED_FILE is not configured".to_string())
    })?;

    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read seed file {}: {}", path.display(), e)))?;
    let seed: SeedFile = serde_json::from_str(&contents)?;

    let loaded = state.store.replace_exchanges(seed.exchanges)?;
    Ok(Json(serde_json::json!({"loaded": loaded.len()})))
}
