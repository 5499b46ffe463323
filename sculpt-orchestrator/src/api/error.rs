//! API Error Handling
//!
//! Unified error types and conversion for API responses. Every error body has
//! the shape `{"error": "<message>", "reason": "<code>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sculpt_core::domain::outcome::{FailureReason, TaskOutcome};
use sculpt_core::dto::convert::ErrorResponse;

use crate::service::session_service::SessionError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// A conversion ended in a terminal failure
    TaskFailed(FailureReason),
    TimedOut,
    Cancelled,
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    InternalError(String),
}

impl ApiError {
    /// Map a non-successful outcome to its error; `None` for `Completed`
    pub fn from_outcome(outcome: &TaskOutcome) -> Option<Self> {
        match outcome {
            TaskOutcome::Completed { .. } => None,
            TaskOutcome::Failed { reason } => Some(ApiError::TaskFailed(*reason)),
            TaskOutcome::TimedOut => Some(ApiError::TimedOut),
            TaskOutcome::Cancelled => Some(ApiError::Cancelled),
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::TaskFailed(FailureReason::InvalidInput) => (
                StatusCode::BAD_REQUEST,
                FailureReason::InvalidInput.as_str(),
                FailureReason::InvalidInput.message().to_string(),
            ),
            ApiError::TaskFailed(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                reason.as_str(),
                reason.message().to_string(),
            ),
            ApiError::TimedOut => (
                StatusCode::GATEWAY_TIMEOUT,
                "timed_out",
                "Timeout waiting for 3D model".to_string(),
            ),
            ApiError::Cancelled => (
                StatusCode::CONFLICT,
                "cancelled",
                "3D generation was cancelled".to_string(),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                FailureReason::InvalidInput.as_str(),
                msg,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, reason, message) = self.parts();

        (
            status,
            Json(ErrorResponse {
                error: message,
                reason: reason.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => ApiError::NotFound(format!("Session {} not found", id)),
            SessionError::AlreadyFinished(id) => {
                ApiError::Conflict(format!("Session {} has already finished", id))
            }
            SessionError::InvalidInput(msg) => ApiError::BadRequest(msg),
            SessionError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
