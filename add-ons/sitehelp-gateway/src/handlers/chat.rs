//! Chat handler: the server side of the widget's remote contract.
//!
//! `POST /api/chat` takes `{ "message", "session_id"? }` and answers `{ "reply", "session_id" }`.
//! Each session id gets its own FAQ engine, so topic memory never leaks between visitors.

use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sitehelp_core::Responder;

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChatResponse {
    pub(crate) reply: String,
    pub(crate) session_id: String,
}

/// POST /api/chat – one turn of one session. A missing session id starts a new session.
pub(crate) async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    let message = req.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "status": "error",
                "error": "message must not be empty"
            })),
        )
            .into_response();
    }

    let session_id = req
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let engine = state.session(&session_id);
    tracing::info!(
        target: "sitehelp::gateway",
        session = %session_id,
        "Chat request received: {} chars",
        message.len()
    );

    match engine.respond(message).await {
        Ok(reply) => Json(ChatResponse { reply, session_id }).into_response(),
        Err(e) => {
            tracing::error!(target: "sitehelp::gateway", session = %session_id, "Chat error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "error",
                    "error": e.to_string()
                })),
            )
                .into_response()
        }
    }
}

/// DELETE /api/chat/:session_id – forget a session and its topic memory.
pub(crate) async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> StatusCode {
    if state.sessions.remove(&session_id).is_some() {
        tracing::debug!(target: "sitehelp::gateway", session = %session_id, "Session ended");
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
