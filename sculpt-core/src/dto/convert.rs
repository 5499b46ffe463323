//! Conversion DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobRequest;

/// Body of a conversion request
///
/// Every field is optional on the wire so that a missing locator is reported
/// as invalid input instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_pbr: Option<bool>,
}

impl ConvertRequest {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
            enable_pbr: None,
        }
    }

    pub fn into_job_request(self) -> JobRequest {
        let request = JobRequest::new(self.image_url.unwrap_or_default());
        match self.enable_pbr {
            Some(enable_pbr) => request.with_pbr(enable_pbr),
            None => request,
        }
    }
}

/// Successful conversion response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub success: bool,
    pub model_url: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub reason: String,
}
