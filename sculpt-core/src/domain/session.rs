//! Session domain types
//!
//! A session is one run of the orchestrator for one request. Its status is
//! published after every transition so callers that do not want to hold a
//! connection open can inspect progress.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::outcome::TaskOutcome;

/// Where a session currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Init,
    Submitting,
    Polling,
    Succeeded,
    Failed,
    TimedOut,
    Cancelled,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Init => "init",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Polling => "polling",
            SessionPhase::Succeeded => "succeeded",
            SessionPhase::Failed => "failed",
            SessionPhase::TimedOut => "timed_out",
            SessionPhase::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionPhase::Succeeded
                | SessionPhase::Failed
                | SessionPhase::TimedOut
                | SessionPhase::Cancelled
        )
    }
}

impl From<&TaskOutcome> for SessionPhase {
    fn from(outcome: &TaskOutcome) -> Self {
        match outcome {
            TaskOutcome::Completed { .. } => SessionPhase::Succeeded,
            TaskOutcome::Failed { .. } => SessionPhase::Failed,
            TaskOutcome::TimedOut => SessionPhase::TimedOut,
            TaskOutcome::Cancelled => SessionPhase::Cancelled,
        }
    }
}

/// Point-in-time snapshot of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub id: Uuid,
    pub phase: SessionPhase,
    /// Poll attempts consumed so far (successful or transient)
    pub attempts: u32,
    pub max_attempts: u32,
    /// Provider job identifier, once submission has succeeded
    pub job_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    pub outcome: Option<TaskOutcome>,
}
