//! Shared application state for the Axum API server.

use std::sync::Arc;

use chainletter_common::config::AppConfig;
use chainletter_store::Store;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<Store>, config: AppConfig) -> Self {
        Self { store, config }
    }
}
