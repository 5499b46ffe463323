//! Task outcome types

use serde::{Deserialize, Serialize};

/// Why a task ended without a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The caller supplied no usable source locator; no network call was made
    InvalidInput,
    /// The provider rejected the job or its creation response was unusable
    SubmissionError,
    /// The provider reported the job as failed
    ProviderReportedFailure,
    /// The provider reported success but returned no usable result locator
    MissingResult,
}

impl FailureReason {
    /// Machine-readable code used in error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::InvalidInput => "invalid_input",
            FailureReason::SubmissionError => "submission_error",
            FailureReason::ProviderReportedFailure => "provider_reported_failure",
            FailureReason::MissingResult => "missing_result",
        }
    }

    /// Human-readable message used in error bodies
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::InvalidInput => "No image URL provided",
            FailureReason::SubmissionError => "Failed to start 3D generation",
            FailureReason::ProviderReportedFailure => "3D generation failed",
            FailureReason::MissingResult => "3D generation finished without a usable model",
        }
    }
}

/// Final result of one orchestration session
///
/// Exactly one outcome is produced per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TaskOutcome {
    Completed { result_locator: String },
    Failed { reason: FailureReason },
    TimedOut,
    Cancelled,
}

impl TaskOutcome {
    pub fn completed(result_locator: impl Into<String>) -> Self {
        TaskOutcome::Completed {
            result_locator: result_locator.into(),
        }
    }

    pub fn failed(reason: FailureReason) -> Self {
        TaskOutcome::Failed { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Completed { .. })
    }

    /// Machine-readable code for this outcome
    pub fn code(&self) -> &'static str {
        match self {
            TaskOutcome::Completed { .. } => "completed",
            TaskOutcome::Failed { reason } => reason.as_str(),
            TaskOutcome::TimedOut => "timed_out",
            TaskOutcome::Cancelled => "cancelled",
        }
    }
}
