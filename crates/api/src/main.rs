//! ChainLetter API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use chainletter_common::config::AppConfig;
use chainletter_store::Store;

use chainletter_api::routes::create_router;
use chainletter_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("chainletter_api=debug,chainletter_store=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting ChainLetter API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Open the flat-file store
    let store = Arc::new(Store::open(&config.data_dir)?);

    // Build application state
    let port = config.port;
    let state = AppState::new(store, config);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
