//! Auth API Routes
//!
//! Login, logout and token introspection for the demo user directory.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::auth::LoginRequest;
use crate::error::{Error, Result};
use crate::state::AppState;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// POST /auth/login - Authenticate and issue a bearer token
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let response = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(response))
}

/// POST /auth/logout - Invalidate the presented token
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse> {
    let token = bearer_token(&headers)?;
    state.auth.logout(token).await;
    Ok(StatusCode::OK)
}

/// GET /auth/me - Resolve the presented token to its user
async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse> {
    let token = bearer_token(&headers)?;
    let user = state.auth.validate(token).await?;
    Ok(Json(user))
}

/// Extract the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| Error::Unauthorized("Missing bearer token".to_string()))
}
