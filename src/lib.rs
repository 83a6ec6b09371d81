//! StateHub - Namespace State Server
//!
//! ## Architecture (4 Components)
//!
//! 1. StateEngine - Namespace state orchestration (pipeline + store)
//! 2. RealtimeHub - WebSocket distribution of state updates
//! 3. AuthService - Demo user directory and bearer tokens
//! 4. WebAPI - REST API endpoints
//!
//! ## Design Principles
//!
//! - SSoT: the StateEngine's repository is the single source of truth
//! - Dual-channel consistency: the hub broadcasts exactly the record the
//!   engine returned for a write, never a re-derived value

pub mod auth;
pub mod error;
pub mod models;
pub mod realtime_hub;
pub mod state;
pub mod state_engine;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
