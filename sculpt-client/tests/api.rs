use sculpt_client::OrchestratorClient;
use sculpt_core::domain::session::SessionPhase;
use sculpt_core::dto::convert::ConvertRequest;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn status_json(id: Uuid, phase: &str) -> serde_json::Value {
    json!({
        "id": id,
        "phase": phase,
        "attempts": 3,
        "maxAttempts": 60,
        "jobId": "job-1",
        "createdAt": "2026-10-14T10:00:00Z",
        "updatedAt": "2026-10-14T10:00:15Z",
        "finishedAt": null,
        "outcome": null
    })
}

#[tokio::test]
async fn test_convert_success() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/image-to-3d"))
        .and(body_json(json!({"imageUrl": "https://example.com/img.png"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "modelUrl": "https://cdn/model.glb"
        })))
        .mount(&server)
        .await;

    let client = OrchestratorClient::new(server.uri());
    let converted = client
        .convert(ConvertRequest::new("https://example.com/img.png"))
        .await?;

    assert!(converted.success);
    assert_eq!(converted.model_url, "https://cdn/model.glb");
    Ok(())
}

#[tokio::test]
async fn test_convert_timeout_keeps_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/image-to-3d"))
        .respond_with(ResponseTemplate::new(504).set_body_json(json!({
            "error": "Timeout waiting for 3D model",
            "reason": "timed_out"
        })))
        .mount(&server)
        .await;

    let client = OrchestratorClient::new(server.uri());
    let err = client
        .convert(ConvertRequest::new("https://example.com/img.png"))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.reason(), Some("timed_out"));
    assert!(err.to_string().contains("Timeout waiting for 3D model"));
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/image-to-3d"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = OrchestratorClient::new(server.uri());
    let err = client
        .convert(ConvertRequest::new("https://example.com/img.png"))
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    assert_eq!(err.reason(), None);
}

#[tokio::test]
async fn test_session_round_trip() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"sessionId": id})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/sessions/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_json(id, "polling")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([status_json(id, "polling")])),
        )
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/sessions/{}", id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrchestratorClient::new(server.uri());

    let submitted = client
        .submit_session(ConvertRequest::new("https://example.com/img.png"))
        .await?;
    assert_eq!(submitted, id);

    let status = client.get_session(id).await?;
    assert_eq!(status.phase, SessionPhase::Polling);
    assert_eq!(status.attempts, 3);
    assert_eq!(status.job_id.as_deref(), Some("job-1"));

    assert_eq!(client.list_sessions().await?.len(), 1);

    client.cancel_session(id).await?;
    Ok(())
}

#[tokio::test]
async fn test_unknown_session() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/sessions/{}/outcome", id)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": format!("Session {} not found", id),
            "reason": "not_found"
        })))
        .mount(&server)
        .await;

    let client = OrchestratorClient::new(server.uri());
    let err = client.await_session(id).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.reason(), Some("not_found"));
}
