//! Meshy provider
//!
//! HTTP implementation of [`ConversionProvider`] for the Meshy image-to-3D API:
//! - `POST {base}/v1/image-to-3d` creates a task and answers `{"result": "<id>"}`
//! - `GET {base}/v1/image-to-3d/{id}` reports `{"status": ..., "model_urls": {...}}`
//!
//! Every call carries the configured bearer credential. Response shapes are
//! decoded leniently: unknown statuses read as pending and malformed
//! `model_urls` read as "no results".

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use sculpt_core::domain::job::{JobHandle, JobRequest, JobStatus, ResultLocators};

use crate::config::Config;
use crate::provider::ConversionProvider;
use crate::provider::error::{ProviderError, ProviderResult};

/// HTTP client for the Meshy API
#[derive(Debug, Clone)]
pub struct MeshyProvider {
    /// Base URL of the provider (e.g., "https://api.meshy.ai")
    base_url: String,
    /// Bearer credential attached to every call
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl MeshyProvider {
    /// Create a new provider client with a default HTTP client
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    /// Create a new provider client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Build a provider from the service configuration
    pub fn from_config(config: &Config) -> ProviderResult<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(
            config.provider_url.clone(),
            config.api_key.clone(),
            client,
        ))
    }

    /// Get the base URL of the provider
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/v1/image-to-3d", self.base_url)
    }

    /// Status URL for one task; the handle is percent-encoded as a single segment
    fn task_url(&self, handle: &JobHandle) -> ProviderResult<Url> {
        let mut url = Url::parse(&self.tasks_url())
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .push(handle.as_str());
        Ok(url)
    }

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ProviderResult<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[async_trait]
impl ConversionProvider for MeshyProvider {
    async fn create_task(&self, request: &JobRequest) -> ProviderResult<JobHandle> {
        let body = create_task_body(request);
        let response = self
            .client
            .post(self.tasks_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let created: CreateTaskResponse = self.handle_response(response).await?;

        created
            .result
            .filter(|id| !id.is_empty())
            .map(JobHandle::new)
            .ok_or(ProviderError::MissingTaskId)
    }

    async fn task_status(&self, handle: &JobHandle) -> ProviderResult<JobStatus> {
        let url = self.task_url(handle)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let body: TaskStatusResponse = self.handle_response(response).await?;

        Ok(body.into_status())
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Build the creation body; typed fields win over passthrough parameters
fn create_task_body(request: &JobRequest) -> Value {
    let mut body: Map<String, Value> = request.extra.clone();
    body.insert(
        "image_url".to_string(),
        Value::String(request.image_url.trim().to_string()),
    );
    body.insert("enable_pbr".to_string(), Value::Bool(request.enable_pbr));
    Value::Object(body)
}

#[derive(Debug, Deserialize)]
struct CreateTaskResponse {
    #[serde(default)]
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TaskStatusResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    model_urls: Option<Value>,
    #[serde(default)]
    task_error: Option<Value>,
}

impl TaskStatusResponse {
    fn into_status(self) -> JobStatus {
        match self.status.as_deref() {
            Some("SUCCEEDED") => JobStatus::Succeeded {
                results: result_locators(self.model_urls),
            },
            Some("FAILED") => JobStatus::Failed {
                message: self
                    .task_error
                    .as_ref()
                    .and_then(|err| err.get("message"))
                    .and_then(Value::as_str)
                    .filter(|msg| !msg.is_empty())
                    .map(str::to_string),
            },
            _ => JobStatus::Pending,
        }
    }
}

/// Keep only non-empty string locators; anything else is not a usable result
fn result_locators(model_urls: Option<Value>) -> ResultLocators {
    let Some(Value::Object(urls)) = model_urls else {
        return ResultLocators::new();
    };

    urls.into_iter()
        .filter_map(|(format, url)| match url {
            Value::String(url) if !url.is_empty() => Some((format.to_lowercase(), url)),
            _ => None,
        })
        .collect()
}
