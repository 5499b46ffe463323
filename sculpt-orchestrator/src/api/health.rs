//! Health Check API Handler
//!
//! Liveness endpoint; also reports how many background sessions are in flight.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::api::AppState;

/// GET /health
/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let active = state
        .sessions
        .list()
        .await
        .iter()
        .filter(|status| !status.phase.is_terminal())
        .count();

    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok", "activeSessions": active })),
    )
}
