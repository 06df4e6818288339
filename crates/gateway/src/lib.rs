//! HTTP API gateway for semroute.
//!
//! Endpoints:
//!
//! - `POST /chat`           — Route a message, get `{session_id, tool, response}`
//! - `GET  /history`        — Every recorded turn
//! - `GET  /history/latest` — The most recent turn
//! - `GET  /tools`          — The tool catalog
//! - `GET  /health`         — Liveness check
//!
//! Built on Axum. The gateway is pure transport: all decision logic
//! lives in the engine.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use semroute_core::message::{SessionId, Turn};
use semroute_engine::RouterEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub engine: Arc<RouterEngine>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// CORS is permissive: the development frontend may be served from any
/// origin. Production deployments should restrict this.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/history", get(history_handler))
        .route("/history/latest", get(latest_handler))
        .route("/tools", get(tools_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(
    config: &semroute_config::AppConfig,
    engine: Arc<RouterEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let app = build_router(Arc::new(GatewayState { engine }));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatRequest {
    /// Existing session ID (omit to start a new session).
    #[serde(default)]
    session_id: Option<String>,

    /// The user's message.
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    session_id: String,
    tool: String,
    response: String,
    degraded: bool,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn chat_handler(
    State(state): State<SharedState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<serde_json::Value>)> {
    let session_id = req
        .session_id
        .as_deref()
        .map(SessionId::from)
        .unwrap_or_default();

    let reply = state
        .engine
        .process_message(session_id, &req.message)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        })?;

    Ok(Json(ChatResponse {
        session_id: reply.session_id.to_string(),
        tool: reply.tool_used,
        response: reply.response,
        degraded: reply.degraded,
    }))
}

async fn history_handler(State(state): State<SharedState>) -> Json<Vec<Turn>> {
    Json(state.engine.history().await)
}

async fn latest_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    match state.engine.latest().await {
        Some(turn) => Json(serde_json::to_value(turn).unwrap_or_default()),
        None => Json(serde_json::json!({ "message": "No history yet" })),
    }
}

async fn tools_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "tools": state.engine.tools() }))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
