//! Application state
//!
//! Holds all shared components and configuration

use crate::auth::AuthService;
use crate::realtime_hub::RealtimeHub;
use crate::state_engine::StateEngine;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Username of the seeded demo account
    pub demo_username: String,
    /// Password of the seeded demo account
    pub demo_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            demo_username: std::env::var("DEMO_USERNAME")
                .unwrap_or_else(|_| "user@example.com".to_string()),
            demo_password: std::env::var("DEMO_PASSWORD")
                .unwrap_or_else(|_| "656frfRRf".to_string()),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// StateEngine (SSoT for namespace state)
    pub engine: Arc<StateEngine>,
    /// RealtimeHub
    pub realtime: Arc<RealtimeHub>,
    /// AuthService
    pub auth: Arc<AuthService>,
}
