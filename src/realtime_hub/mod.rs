//! RealtimeHub - WebSocket Distribution
//!
//! ## Responsibilities
//!
//! - WebSocket connection management
//! - Per-namespace topic subscriptions
//! - Fan-out of processed state records to a topic's subscribers
//!
//! The hub broadcasts exactly the record the StateEngine returned for a
//! write; it never re-invokes the processing pipeline. Delivery is
//! best-effort: a subscriber that disconnected mid-broadcast is skipped.

use crate::state_engine::StateRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Server-to-client message types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum HubMessage {
    /// New current state for a namespace
    StateUpdate(StateRecord),
    /// Rejection of a malformed client frame
    Error(ErrorMessage),
}

/// Error frame payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Client-to-server message types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join a namespace topic
    Subscribe(TopicRequest),
    /// Leave a namespace topic
    Unsubscribe(TopicRequest),
    /// Submit a state update for a namespace
    Publish(PublishRequest),
    /// Ask for the current state of a namespace, answered on its topic
    Request(TopicRequest),
}

/// Topic membership request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRequest {
    pub namespace: String,
}

/// State update submitted over the WebSocket
///
/// The namespace here is the destination, equivalent to the path parameter
/// of the REST write; absent content is an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub namespace: String,
    #[serde(default)]
    pub content: String,
}

/// Client connection
struct ClientConnection {
    id: Uuid,
    topics: HashSet<String>,
    tx: mpsc::UnboundedSender<String>,
}

/// RealtimeHub instance
pub struct RealtimeHub {
    connections: RwLock<HashMap<Uuid, ClientConnection>>,
    connection_count: AtomicU64,
}

impl RealtimeHub {
    /// Create new RealtimeHub
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            connection_count: AtomicU64::new(0),
        }
    }

    /// Register a new client
    pub async fn register(&self) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();

        let conn = ClientConnection {
            id,
            topics: HashSet::new(),
            tx,
        };

        {
            let mut connections = self.connections.write().await;
            connections.insert(id, conn);
        }

        self.connection_count.fetch_add(1, Ordering::Relaxed);

        tracing::info!(connection_id = %id, "Client connected");

        (id, rx)
    }

    /// Unregister a client
    pub async fn unregister(&self, id: &Uuid) {
        let mut connections = self.connections.write().await;
        if connections.remove(id).is_some() {
            self.connection_count.fetch_sub(1, Ordering::Relaxed);
            tracing::info!(connection_id = %id, "Client disconnected");
        }
    }

    /// Subscribe a connection to a namespace topic
    pub async fn subscribe(&self, id: &Uuid, namespace: &str) {
        let mut connections = self.connections.write().await;
        if let Some(conn) = connections.get_mut(id) {
            conn.topics.insert(namespace.to_string());
            tracing::debug!(connection_id = %id, namespace = %namespace, "Subscribed to topic");
        }
    }

    /// Unsubscribe a connection from a namespace topic
    pub async fn unsubscribe(&self, id: &Uuid, namespace: &str) {
        let mut connections = self.connections.write().await;
        if let Some(conn) = connections.get_mut(id) {
            conn.topics.remove(namespace);
            tracing::debug!(connection_id = %id, namespace = %namespace, "Unsubscribed from topic");
        }
    }

    /// Broadcast a processed record to all subscribers of its namespace topic
    pub async fn publish(&self, namespace: &str, record: StateRecord) {
        let json = match serde_json::to_string(&HubMessage::StateUpdate(record)) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize state update");
                return;
            }
        };

        let connections = self.connections.read().await;
        let mut delivered = 0usize;
        for conn in connections.values() {
            if conn.topics.contains(namespace) {
                if let Err(e) = conn.tx.send(json.clone()) {
                    tracing::warn!(connection_id = %conn.id, error = %e, "Failed to send message");
                } else {
                    delivered += 1;
                }
            }
        }

        tracing::debug!(namespace = %namespace, subscribers = delivered, "State update broadcast");
    }

    /// Send a message to a single connection
    pub async fn send_to(&self, id: &Uuid, message: HubMessage) {
        let json = match serde_json::to_string(&message) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize message");
                return;
            }
        };

        let connections = self.connections.read().await;
        if let Some(conn) = connections.get(id) {
            if let Err(e) = conn.tx.send(json) {
                tracing::warn!(connection_id = %conn.id, error = %e, "Failed to send message");
            }
        }
    }

    /// Get connection count
    pub fn connection_count(&self) -> u64 {
        self.connection_count.load(Ordering::Relaxed)
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}
