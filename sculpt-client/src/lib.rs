//! Sculpt HTTP Client
//!
//! A small, type-safe HTTP client for the Sculpt orchestrator API.
//!
//! # Example
//!
//! ```no_run
//! use sculpt_client::OrchestratorClient;
//! use sculpt_core::dto::convert::ConvertRequest;
//!
//! #[tokio::main]
//! async fn main() -> sculpt_client::Result<()> {
//!     let client = OrchestratorClient::new("http://localhost:8080");
//!
//!     let converted = client
//!         .convert(ConvertRequest::new("https://example.com/img.png"))
//!         .await?;
//!
//!     println!("Model ready: {}", converted.model_url);
//!     Ok(())
//! }
//! ```

pub mod error;
mod convert;
mod sessions;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use sculpt_core::domain::session::SessionStatus;

use reqwest::Client;
use sculpt_core::dto::convert::ErrorResponse;
use serde::de::DeserializeOwned;

/// HTTP client for the Sculpt orchestrator API
///
/// Endpoints are grouped into:
/// - Blocking conversion
/// - Background sessions (submit, inspect, wait, cancel)
#[derive(Debug, Clone)]
pub struct OrchestratorClient {
    /// Base URL of the orchestrator (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl OrchestratorClient {
    /// Create a new orchestrator client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the orchestrator API (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new orchestrator client with a custom HTTP client
    ///
    /// A blocking conversion can take minutes, so a custom client should not
    /// set a request timeout shorter than the orchestrator's polling budget.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the orchestrator
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from(status.as_u16(), response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from(status.as_u16(), response).await);
        }

        Ok(())
    }

    /// Build an error from a failed response, keeping the reason code if the
    /// body has the orchestrator's error shape
    async fn error_from(status: u16, response: reqwest::Response) -> ClientError {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => ClientError::api_error(status, Some(err.reason), err.error),
            Err(_) => ClientError::api_error(status, None, body),
        }
    }
}
