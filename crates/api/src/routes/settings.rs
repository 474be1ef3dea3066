//! Letter defaults routes — the settings repository surface.

use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};

use chainletter_common::error::AppError;
use chainletter_common::types::Settings;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/settings", get(get_settings))
        .route("/api/settings", put(put_settings))
}

/// GET /api/settings — Current letter defaults.
async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.store.get_settings())
}

/// PUT /api/settings — Replace the letter defaults wholesale.
async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, AppError> {
    let saved = state.store.put_settings(settings)?;
    Ok(Json(saved))
}
