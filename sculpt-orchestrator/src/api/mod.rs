//! API Module
//!
//! HTTP API layer for the orchestrator.
//! Each submodule handles endpoints for a specific concern.

pub mod convert;
pub mod error;
pub mod health;
pub mod session;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::orchestrator::TaskOrchestrator;
use crate::service::session_service::SessionService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TaskOrchestrator>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    pub fn new(orchestrator: Arc<TaskOrchestrator>, sessions: Arc<SessionService>) -> Self {
        Self {
            orchestrator,
            sessions,
        }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Blocking conversion
        .route("/api/image-to-3d", post(convert::image_to_3d))
        // Session endpoints
        .route(
            "/api/sessions",
            post(session::submit_session).get(session::list_sessions),
        )
        .route(
            "/api/sessions/{id}",
            get(session::get_session).delete(session::cancel_session),
        )
        .route("/api/sessions/{id}/outcome", get(session::await_outcome))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::{PollPolicy, ResultPreference};
    use crate::provider::scripted::{Reply, ScriptedProvider};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(provider: Arc<ScriptedProvider>) -> Router {
        let orchestrator = Arc::new(TaskOrchestrator::new(
            provider,
            PollPolicy::default(),
            ResultPreference::default(),
        ));
        let sessions = Arc::new(SessionService::new(
            Arc::clone(&orchestrator),
            Duration::from_secs(3600),
        ));
        create_router(AppState::new(orchestrator, sessions))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn convert(provider: ScriptedProvider, body: &str) -> (StatusCode, Value) {
        let response = app(Arc::new(provider))
            .oneshot(json_request("POST", "/api/image-to-3d", body))
            .await
            .unwrap();
        let status = response.status();
        (status, read_json(response).await)
    }

    #[tokio::test]
    async fn test_health() {
        let provider = Arc::new(ScriptedProvider::accepting("job-1", Vec::new()));
        let response = app(provider)
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({"status": "ok", "activeSessions": 0})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_convert_success() {
        let provider = ScriptedProvider::accepting(
            "job-1",
            vec![
                Reply::Pending,
                Reply::Succeeded(vec![("glb", "https://cdn/model.glb")]),
            ],
        );
        let (status, body) = convert(provider, r#"{"imageUrl": "https://example.com/img.png"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "modelUrl": "https://cdn/model.glb"})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_convert_missing_locator() {
        for body in ["{}", r#"{"imageUrl": ""}"#, "not json"] {
            let provider = ScriptedProvider::accepting("job-1", Vec::new());
            let (status, body) = convert(provider, body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["reason"], "invalid_input");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_convert_without_content_type() {
        let provider = Arc::new(ScriptedProvider::accepting(
            "job-1",
            vec![Reply::Succeeded(vec![("glb", "https://cdn/model.glb")])],
        ));
        let app = app(Arc::clone(&provider));

        let request = Request::builder()
            .method("POST")
            .uri("/api/image-to-3d")
            .body(Body::from(r#"{"imageUrl": "https://example.com/img.png"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({"success": true, "modelUrl": "https://cdn/model.glb"})
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/sessions")
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"imageUrl": "https://example.com/img.png"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(provider.submissions(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_convert_submission_error() {
        let (status, body) = convert(
            ScriptedProvider::rejecting(),
            r#"{"imageUrl": "https://example.com/img.png"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to start 3D generation", "reason": "submission_error"})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_convert_provider_failure() {
        let (status, body) = convert(
            ScriptedProvider::accepting("job-1", vec![Reply::Failed]),
            r#"{"imageUrl": "https://example.com/img.png"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["reason"], "provider_reported_failure");
    }

    #[tokio::test(start_paused = true)]
    async fn test_convert_timeout() {
        let (status, body) = convert(
            ScriptedProvider::accepting("job-1", Vec::new()),
            r#"{"imageUrl": "https://example.com/img.png"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            body,
            json!({"error": "Timeout waiting for 3D model", "reason": "timed_out"})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_lifecycle() {
        let provider = Arc::new(ScriptedProvider::accepting(
            "job-1",
            vec![Reply::Succeeded(vec![("obj", "https://cdn/model.obj")])],
        ));
        let app = app(provider);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/sessions",
                r#"{"imageUrl": "https://example.com/img.png"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let session_id = read_json(response).await["sessionId"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/sessions/{}/outcome", session_id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({"success": true, "modelUrl": "https://cdn/model.obj"})
        );

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/sessions/{}", session_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let status = read_json(response).await;
        assert_eq!(status["phase"], "succeeded");
        assert_eq!(status["jobId"], "job-1");
        assert_eq!(status["attempts"], 1);
        assert_eq!(status["outcome"]["resultLocator"], "https://cdn/model.obj");

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/sessions/{}", session_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .oneshot(empty_request("GET", "/api/sessions"))
            .await
            .unwrap();
        assert_eq!(read_json(response).await.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_session_over_http() {
        let provider = Arc::new(ScriptedProvider::accepting("job-1", Vec::new()));
        let app = app(provider);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/sessions",
                r#"{"imageUrl": "https://example.com/img.png"}"#,
            ))
            .await
            .unwrap();
        let session_id = read_json(response).await["sessionId"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/sessions/{}", session_id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(empty_request(
                "GET",
                &format!("/api/sessions/{}/outcome", session_id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(read_json(response).await["reason"], "cancelled");
    }

    #[tokio::test(start_paused = true)]
    async fn test_crashed_session_over_http() {
        let app = app(Arc::new(ScriptedProvider::panicking()));

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/sessions",
                r#"{"imageUrl": "https://example.com/img.png"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let session_id = read_json(response).await["sessionId"]
            .as_str()
            .unwrap()
            .to_string();

        for uri in [
            format!("/api/sessions/{}/outcome", session_id),
            format!("/api/sessions/{}", session_id),
        ] {
            let response = app
                .clone()
                .oneshot(empty_request("GET", &uri))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                read_json(response).await,
                json!({"error": "Server error", "reason": "internal_error"})
            );
        }
    }

    #[tokio::test]
    async fn test_session_submit_invalid_and_unknown() {
        let provider = Arc::new(ScriptedProvider::accepting("job-1", Vec::new()));
        let app = app(provider);

        for body in ["{}", "not json"] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/sessions", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(read_json(response).await["reason"], "invalid_input");
        }

        let response = app
            .oneshot(empty_request(
                "GET",
                &format!("/api/sessions/{}", uuid::Uuid::new_v4()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["reason"], "not_found");
    }
}
