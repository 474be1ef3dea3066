pub mod addresses;
pub mod documents;
pub mod exchanges;
pub mod health;
pub mod reports;
pub mod settings;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(addresses::router())
        .merge(exchanges::router())
        .merge(reports::router())
        .merge(settings::router())
        .merge(documents::router())
        .merge(templates::router())
        .with_state(state)
}
