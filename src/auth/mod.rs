//! AuthService - Demo User Directory and Bearer Tokens
//!
//! ## Responsibilities
//!
//! - In-memory user directory (seeded demo account)
//! - Opaque bearer token issuance, validation and revocation
//!
//! Identity stops at this layer: the StateEngine never sees or requires a
//! credential.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User profile returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    pub name: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// In-memory user directory with opaque bearer tokens
pub struct AuthService {
    users: HashMap<String, UserInfo>,
    password: String,
    /// token -> username
    tokens: RwLock<HashMap<String, String>>,
}

impl AuthService {
    /// Create the service with a seeded demo account
    pub fn new(demo_username: &str, demo_password: &str) -> Self {
        let mut users = HashMap::new();
        users.insert(
            demo_username.to_string(),
            UserInfo {
                id: 1,
                username: demo_username.to_string(),
                name: "Demo User".to_string(),
            },
        );

        Self {
            users,
            password: demo_password.to_string(),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Authenticate a user and issue a bearer token
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let user = self
            .users
            .get(username)
            .filter(|_| password == self.password)
            .ok_or_else(|| Error::Unauthorized("Invalid username or password".to_string()))?;

        let token = Uuid::new_v4().to_string();
        {
            let mut tokens = self.tokens.write().await;
            tokens.insert(token.clone(), user.username.clone());
        }

        tracing::info!(username = %user.username, "User logged in");

        Ok(AuthResponse {
            token,
            user: user.clone(),
        })
    }

    /// Invalidate a token
    ///
    /// Unknown tokens are ignored; logout is idempotent.
    pub async fn logout(&self, token: &str) {
        let mut tokens = self.tokens.write().await;
        if tokens.remove(token).is_some() {
            tracing::info!("Token invalidated");
        }
    }

    /// Resolve a bearer token to its user
    pub async fn validate(&self, token: &str) -> Result<UserInfo> {
        let tokens = self.tokens.read().await;
        let username = tokens
            .get(token)
            .ok_or_else(|| Error::Unauthorized("Invalid or expired token".to_string()))?;

        self.users
            .get(username)
            .cloned()
            .ok_or_else(|| Error::Unauthorized("Unknown user".to_string()))
    }
}
