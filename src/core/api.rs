//! HTTP + WebSocket status API
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /status - Current history, bonus flag and last prediction
//! - WS /ws - Live prediction updates

use std::path::Path;
use std::sync::Arc;
use axum::{
    extract::{State, WebSocketUpgrade, ws::{Message, WebSocket}},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::core::session::Session;
use crate::types::{Bucket, PredictionOutput};

/// Capacity of the live update channel
const UPDATE_CHANNEL_CAPACITY: usize = 100;

/// Snapshot of the watcher's session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub log_file: Option<String>,
    pub history: Vec<Bucket>,
    pub bonus: bool,
    pub last_prediction: bool,
    pub rounds_seen: u64,
    pub last_output: Option<PredictionOutput>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rounds_seen: u64,
}

/// Shared state between the watcher and the API
#[derive(Debug)]
pub struct StatusBoard {
    status: RwLock<StatusSnapshot>,
    updates: broadcast::Sender<PredictionOutput>,
}

impl StatusBoard {
    pub fn new() -> Arc<Self> {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Arc::new(Self {
            status: RwLock::new(StatusSnapshot::default()),
            updates,
        })
    }

    /// Copy the session state into the snapshot
    pub async fn publish_session(&self, session: &Session, log_file: Option<&Path>) {
        let mut status = self.status.write().await;
        status.log_file = log_file.map(|p| p.display().to_string());
        status.history = session.history().to_vec();
        status.bonus = session.bonus();
        status.last_prediction = session.last_prediction();
        status.rounds_seen = session.rounds_seen();
        status.last_output = session.last_output().cloned();
        status.updated_at = Some(Utc::now());
    }

    /// Push a prediction to live subscribers
    pub fn publish_prediction(&self, output: &PredictionOutput) {
        // No subscribers is fine
        let _ = self.updates.send(output.clone());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PredictionOutput> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> StatusSnapshot {
        self.status.read().await.clone()
    }
}

/// Create the API router
pub fn create_router(board: Arc<StatusBoard>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/ws", get(websocket_handler))
        .with_state(board)
}

/// Health check endpoint
async fn health(State(board): State<Arc<StatusBoard>>) -> Json<HealthResponse> {
    let status = board.status.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        rounds_seen: status.rounds_seen,
    })
}

/// Current session status
async fn status(State(board): State<Arc<StatusBoard>>) -> Json<StatusSnapshot> {
    Json(board.snapshot().await)
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(board): State<Arc<StatusBoard>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = board.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward predictions until the client goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<PredictionOutput>) {
    let (mut sender, mut receiver) = socket.split();
    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(output) => {
                    let json = serde_json::to_string(&output).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "websocket client lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
}

/// Run the API server
pub async fn run_server(addr: &str, board: Arc<StatusBoard>) -> std::io::Result<()> {
    let router = create_router(board);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}
