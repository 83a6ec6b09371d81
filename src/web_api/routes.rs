//! API Routes

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use futures::{SinkExt, StreamExt};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::realtime_hub::{ClientMessage, ErrorMessage, HubMessage};
use crate::state::AppState;
use crate::state_engine::StateRecord;

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/api/heartbeat", get(super::heartbeat))
        // Namespace state
        .route("/api/state/:namespace", get(get_state))
        .route("/api/message/:namespace", post(send_message))
        // Auth
        .merge(super::auth_routes::auth_routes())
        // WebSocket
        .route("/api/ws", get(websocket_handler))
        .with_state(state)
}

// ========================================
// State Handlers
// ========================================

/// GET /api/state/:namespace - Current state for a namespace
async fn get_state(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> impl IntoResponse {
    let record = state.engine.get_state(&namespace).await;
    Json(record)
}

/// POST /api/message/:namespace - Submit a state update
///
/// The processed record is echoed to the writer and broadcast to the
/// namespace's subscribers.
async fn send_message(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(record): Json<StateRecord>,
) -> impl IntoResponse {
    let processed = state.engine.submit_state(&namespace, record).await;

    state.realtime.publish(&namespace, processed.clone()).await;

    Json(processed)
}

// ========================================
// WebSocket Handler
// ========================================

/// WebSocket upgrade handler
async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Handle WebSocket connection
async fn handle_websocket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Register with RealtimeHub
    let (conn_id, mut rx) = state.realtime.register().await;

    tracing::info!(connection_id = %conn_id, "WebSocket client connected");

    // Forward hub messages to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Handle incoming frames
    let recv_state = state.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    handle_client_frame(&recv_state, &conn_id, &text).await;
                }
                Ok(Message::Ping(data)) => {
                    // Pong is handled automatically by axum
                    tracing::trace!("Received ping: {:?}", data);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %conn_id, "WebSocket client disconnected");
                    break;
                }
                Err(e) => {
                    tracing::warn!(connection_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
        conn_id
    });

    // Wait for either task to complete
    let conn_id = tokio::select! {
        _ = send_task => conn_id,
        result = recv_task => result.unwrap_or(conn_id),
    };

    // Unregister from hub
    state.realtime.unregister(&conn_id).await;
}

/// Dispatch one client frame
async fn handle_client_frame(state: &AppState, conn_id: &Uuid, text: &str) {
    let message = match parse_client_frame(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(connection_id = %conn_id, error = %e, "Rejected client frame");
            let error = HubMessage::Error(ErrorMessage {
                message: e.to_string(),
            });
            state.realtime.send_to(conn_id, error).await;
            return;
        }
    };

    match message {
        ClientMessage::Subscribe(req) => {
            state.realtime.subscribe(conn_id, &req.namespace).await;
        }
        ClientMessage::Unsubscribe(req) => {
            state.realtime.unsubscribe(conn_id, &req.namespace).await;
        }
        ClientMessage::Publish(req) => {
            // Same path as the REST write: engine first, then fan-out of the
            // engine's return value
            let input = StateRecord::new(req.content, req.namespace.clone());
            let processed = state.engine.submit_state(&req.namespace, input).await;
            state.realtime.publish(&req.namespace, processed).await;
        }
        ClientMessage::Request(req) => {
            let current = state.engine.get_state(&req.namespace).await;
            state.realtime.publish(&req.namespace, current).await;
        }
    }
}

/// Parse a client frame, surfacing malformed input as a client-facing error
fn parse_client_frame(text: &str) -> Result<ClientMessage> {
    serde_json::from_str(text).map_err(|e| Error::Validation(format!("Malformed frame: {}", e)))
}
