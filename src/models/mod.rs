//! Shared data models

use serde::{Deserialize, Serialize};

/// Heartbeat response
#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    pub status: String,
    pub timestamp: String,
}
