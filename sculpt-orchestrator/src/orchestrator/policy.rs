//! Polling and result-selection policies

use std::time::Duration;

use sculpt_core::domain::job::ResultLocators;

/// Bounds the polling loop of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Poll attempts allowed before the session times out
    pub max_attempts: u32,
    /// Delay before every poll attempt, including the first
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Worst-case time spent polling
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(60, Duration::from_secs(5))
    }
}

/// Ordered list of acceptable model formats
///
/// The first format present in a successful status wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPreference {
    formats: Vec<String>,
}

impl ResultPreference {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            formats: formats
                .into_iter()
                .map(|format| format.as_ref().trim().to_lowercase())
                .filter(|format| !format.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated list such as `"glb,obj"`
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Pick the preferred usable locator, if any
    pub fn select<'a>(&self, results: &'a ResultLocators) -> Option<&'a str> {
        self.formats
            .iter()
            .filter_map(|format| results.get(format))
            .map(|url| url.trim())
            .find(|url| !url.is_empty())
    }
}

impl Default for ResultPreference {
    fn default() -> Self {
        Self::new(["glb", "obj"])
    }
}
