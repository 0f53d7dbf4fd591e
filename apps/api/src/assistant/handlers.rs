//! Axum route handlers for the assistant panel.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::assistant::sessions::PanelSnapshot;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// POST /api/v1/assistant/sessions
///
/// Opens the panel: a new session holding only the greeting.
pub async fn handle_open_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<PanelSnapshot>), AppError> {
    let snapshot = state.sessions.open().await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/assistant/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PanelSnapshot>, AppError> {
    Ok(Json(state.sessions.snapshot(session_id).await?))
}

/// POST /api/v1/assistant/sessions/:id/messages
///
/// Submits one user turn and responds once the assistant reply is appended.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<PanelSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .submit(session_id, &request.content)
        .await?;
    Ok(Json(snapshot))
}

/// DELETE /api/v1/assistant/sessions/:id
///
/// Closes the panel, discarding the transcript and aborting any pending reply.
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.close(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
