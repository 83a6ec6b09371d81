//! WebAPI - REST API Endpoints
//!
//! ## Responsibilities
//!
//! - HTTP API routes
//! - WebSocket upgrade and frame dispatch
//! - Response formatting

mod auth_routes;
mod routes;

pub use routes::create_router;

use axum::response::IntoResponse;
use axum::Json;

use crate::models::HeartbeatResponse;

/// Liveness probe
pub async fn heartbeat() -> impl IntoResponse {
    Json(HeartbeatResponse {
        status: "alive".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
