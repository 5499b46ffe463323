//! Conversion API Handler
//!
//! Blocking image-to-3D endpoint: the response is sent once the session ends.

use axum::{Json, body::Bytes, extract::State};
use sculpt_core::domain::outcome::TaskOutcome;
use sculpt_core::dto::convert::{ConvertRequest, ConvertResponse};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// POST /api/image-to-3d
/// Convert an image and wait for the model
///
/// The body is read as JSON whatever its content type. Bodies that do not
/// parse are treated like a missing image URL.
pub async fn image_to_3d(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ConvertResponse>> {
    let req = match parse_convert_request(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!("Rejecting conversion request: {}", e);
            ConvertRequest::default()
        }
    };

    tracing::info!(
        "Converting image: {}",
        req.image_url.as_deref().unwrap_or("<missing>")
    );

    let outcome = state.orchestrator.run(req.into_job_request()).await;

    outcome_response(outcome)
}

/// Parse a conversion body without looking at the `Content-Type` header
pub fn parse_convert_request(body: &[u8]) -> Result<ConvertRequest, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Shape an outcome into the caller-facing response
pub fn outcome_response(outcome: TaskOutcome) -> ApiResult<Json<ConvertResponse>> {
    match outcome {
        TaskOutcome::Completed { result_locator } => Ok(Json(ConvertResponse {
            success: true,
            model_url: result_locator,
        })),
        other => Err(ApiError::from_outcome(&other)
            .unwrap_or_else(|| ApiError::InternalError(format!("Unmapped outcome {:?}", other)))),
    }
}
