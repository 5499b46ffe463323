//! Session API Handlers
//!
//! HTTP endpoints for background conversion sessions.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use sculpt_core::domain::session::SessionStatus;
use sculpt_core::dto::convert::ConvertResponse;
use sculpt_core::dto::session::SessionCreated;
use uuid::Uuid;

use crate::api::AppState;
use crate::api::convert::{outcome_response, parse_convert_request};
use crate::api::error::{ApiError, ApiResult};

/// POST /api/sessions
/// Start a conversion in the background
pub async fn submit_session(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<SessionCreated>)> {
    let req = parse_convert_request(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;

    let session_id = state.sessions.submit(req.into_job_request()).await?;

    Ok((StatusCode::ACCEPTED, Json(SessionCreated { session_id })))
}

/// GET /api/sessions
/// List all known sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionStatus>> {
    tracing::debug!("Listing sessions");

    Json(state.sessions.list().await)
}

/// GET /api/sessions/{id}
/// Get the current status of a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionStatus>> {
    tracing::debug!("Getting session: {}", id);

    Ok(Json(state.sessions.status(id).await?))
}

/// GET /api/sessions/{id}/outcome
/// Wait for a session to finish and answer like the blocking endpoint
pub async fn await_outcome(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ConvertResponse>> {
    tracing::debug!("Waiting for session: {}", id);

    let status = state.sessions.wait(id).await?;

    match status.outcome {
        Some(outcome) => outcome_response(outcome),
        None => Err(ApiError::InternalError(format!(
            "Session {} finished without an outcome",
            id
        ))),
    }
}

/// DELETE /api/sessions/{id}
/// Cancel a running session
pub async fn cancel_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    tracing::info!("Cancelling session: {}", id);

    state.sessions.cancel(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
