//! Orchestrator configuration
//!
//! Defines all configurable parameters for the service including the
//! provider connection, the polling budget and the HTTP listener.

use std::time::Duration;

use crate::orchestrator::{PollPolicy, ResultPreference};

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the provider
    pub api_key: String,

    /// Provider base URL (e.g., "https://api.meshy.ai")
    pub provider_url: String,

    /// Address the HTTP API listens on
    pub bind_addr: String,

    /// Delay before every status query
    pub poll_interval: Duration,

    /// Status queries allowed per session before it times out
    pub max_attempts: u32,

    /// Preferred model formats, most preferred first
    pub result_formats: ResultPreference,

    /// Timeout applied to each individual provider call
    pub request_timeout: Duration,

    /// How long finished background sessions remain queryable
    pub session_retention: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        let policy = PollPolicy::default();
        Self {
            api_key: api_key.into(),
            provider_url: "https://api.meshy.ai".to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            poll_interval: policy.interval,
            max_attempts: policy.max_attempts,
            result_formats: ResultPreference::default(),
            request_timeout: Duration::from_secs(30),
            session_retention: Duration::from_secs(3600),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MESHY_API_KEY (required)
    /// - MESHY_API_URL (optional, default: https://api.meshy.ai)
    /// - SCULPT_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - POLL_INTERVAL (optional, seconds, default: 5)
    /// - POLL_MAX_ATTEMPTS (optional, default: 60)
    /// - RESULT_FORMATS (optional, comma separated, default: glb,obj)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 30)
    /// - SESSION_RETENTION (optional, seconds, default: 3600)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = var("MESHY_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("MESHY_API_KEY environment variable not set"))?;

        let mut config = Self::new(api_key);

        if let Some(url) = var("MESHY_API_URL") {
            config.provider_url = url;
        }

        if let Some(addr) = var("SCULPT_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(secs) = parse_var::<u64, _>(&var, "POLL_INTERVAL")? {
            config.poll_interval = Duration::from_secs(secs);
        }

        if let Some(attempts) = parse_var::<u32, _>(&var, "POLL_MAX_ATTEMPTS")? {
            config.max_attempts = attempts;
        }

        if let Some(formats) = var("RESULT_FORMATS") {
            config.result_formats = ResultPreference::parse(&formats);
        }

        if let Some(secs) = parse_var::<u64, _>(&var, "REQUEST_TIMEOUT")? {
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_var::<u64, _>(&var, "SESSION_RETENTION")? {
            config.session_retention = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// The polling policy described by this configuration
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(self.max_attempts, self.poll_interval)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("api_key cannot be empty");
        }

        if !self.provider_url.starts_with("http://") && !self.provider_url.starts_with("https://")
        {
            anyhow::bail!("provider_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        if self.result_formats.is_empty() {
            anyhow::bail!("result_formats must name at least one format");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

/// Parse an optional numeric variable, failing loudly on garbage
fn parse_var<T, F>(var: &F, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
        })
        .transpose()
}
