//! StateHub - Namespace State Server
//!
//! Main entry point.

use statehub::{
    auth::AuthService,
    realtime_hub::RealtimeHub,
    state::{AppConfig, AppState},
    state_engine::{StateEngine, StateRepository},
    web_api,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statehub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StateHub v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::default();
    tracing::info!(host = %config.host, port = config.port, "Configuration loaded");

    // Initialize components
    let engine = Arc::new(StateEngine::new(StateRepository::new()));
    let realtime = Arc::new(RealtimeHub::new());
    let auth = Arc::new(AuthService::new(
        &config.demo_username,
        &config.demo_password,
    ));

    // Create application state
    let state = AppState {
        config: config.clone(),
        engine,
        realtime,
        auth,
    };

    let app = web_api::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
