//! Job domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Result locators reported by the provider, keyed by model format (e.g. "glb")
pub type ResultLocators = BTreeMap<String, String>;

/// A request to convert a source image into a 3D model
///
/// Created per call and consumed by a single orchestration session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Locator of the source image
    pub image_url: String,
    /// Ask the provider for physically based rendering textures
    #[serde(default = "default_enable_pbr")]
    pub enable_pbr: bool,
    /// Additional provider parameters forwarded verbatim
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

fn default_enable_pbr() -> bool {
    true
}

impl JobRequest {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            enable_pbr: default_enable_pbr(),
            extra: Map::new(),
        }
    }

    pub fn with_pbr(mut self, enable_pbr: bool) -> Self {
        self.enable_pbr = enable_pbr;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Returns the trimmed source locator, or `None` when it is blank
    pub fn locator(&self) -> Option<&str> {
        let locator = self.image_url.trim();
        (!locator.is_empty()).then_some(locator)
    }
}

/// Provider-issued identifier for a submitted job
///
/// Only meaningful inside the polling session that obtained it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-reported state of a job, received once per poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Queued, processing, or any state the orchestrator does not recognise
    Pending,
    /// Finished; carries whatever result locators the provider returned
    Succeeded { results: ResultLocators },
    /// Finished without a usable result
    Failed { message: Option<String> },
}
