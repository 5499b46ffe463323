//! Poll session state machine
//!
//! A [`PollSession`] is the explicit state machine behind one request:
//!
//! ```text
//! Init -> Submitting -> Polling <-> Polling -> Finished(outcome)
//! ```
//!
//! Each call to [`PollSession::step`] performs at most one provider call and
//! one transition. The session never sleeps itself; the driver asks
//! [`PollSession::delay_before_step`] how long to wait first, which keeps the
//! timing (and cancellation) in the hands of whoever advances it.

use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use sculpt_core::domain::job::{JobHandle, JobRequest, JobStatus};
use sculpt_core::domain::outcome::{FailureReason, TaskOutcome};
use sculpt_core::domain::session::{SessionPhase, SessionStatus};

use crate::orchestrator::policy::{PollPolicy, ResultPreference};
use crate::provider::ConversionProvider;

/// Internal state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Init,
    Submitting,
    Polling { handle: JobHandle },
    Finished(TaskOutcome),
}

/// One orchestration session for one request
#[derive(Debug)]
pub struct PollSession {
    id: Uuid,
    request: JobRequest,
    policy: PollPolicy,
    preference: ResultPreference,
    state: SessionState,
    /// Poll attempts consumed; survives the end of polling for snapshots
    attempts: u32,
    job_id: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    finished_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PollSession {
    pub fn new(
        id: Uuid,
        request: JobRequest,
        policy: PollPolicy,
        preference: ResultPreference,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id,
            request,
            policy,
            preference,
            state: SessionState::Init,
            attempts: 0,
            job_id: None,
            created_at: now,
            updated_at: now,
            finished_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.state {
            SessionState::Init => SessionPhase::Init,
            SessionState::Submitting => SessionPhase::Submitting,
            SessionState::Polling { .. } => SessionPhase::Polling,
            SessionState::Finished(outcome) => SessionPhase::from(outcome),
        }
    }

    /// Poll attempts consumed so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn outcome(&self) -> Option<&TaskOutcome> {
        match &self.state {
            SessionState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// How long the driver must wait before the next [`step`](Self::step)
    ///
    /// Only polling steps are delayed.
    pub fn delay_before_step(&self) -> Option<Duration> {
        match self.state {
            SessionState::Polling { .. } => Some(self.policy.interval),
            _ => None,
        }
    }

    /// Snapshot for external observers
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            id: self.id,
            phase: self.phase(),
            attempts: self.attempts,
            max_attempts: self.policy.max_attempts,
            job_id: self.job_id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            finished_at: self.finished_at,
            outcome: self.outcome().cloned(),
        }
    }

    /// Ends a session that has not finished yet
    ///
    /// The job handle is dropped; no further polls will be issued.
    pub fn cancel(&mut self) {
        if self.outcome().is_none() {
            info!("Session {} cancelled in phase {:?}", self.id, self.phase());
            self.transition(SessionState::Finished(TaskOutcome::Cancelled));
        }
    }

    /// Advances the session by one transition
    ///
    /// Does nothing once the session has finished.
    pub async fn step<P>(&mut self, provider: &P)
    where
        P: ConversionProvider + ?Sized,
    {
        let mut polled = false;

        let next = match &self.state {
            SessionState::Init => self.validate(),
            SessionState::Submitting => self.submit(provider).await,
            SessionState::Polling { handle } => {
                if self.attempts >= self.policy.max_attempts {
                    self.timed_out(handle)
                } else {
                    polled = true;
                    self.poll(provider, handle, self.attempts + 1).await
                }
            }
            SessionState::Finished(_) => return,
        };

        if polled {
            self.attempts += 1;
        }
        self.transition(next);
    }

    fn transition(&mut self, next: SessionState) {
        let now = chrono::Utc::now();

        match &next {
            SessionState::Polling { handle } => self.job_id = Some(handle.to_string()),
            SessionState::Finished(_) => self.finished_at = Some(now),
            _ => {}
        }

        self.updated_at = now;
        self.state = next;
    }

    fn validate(&self) -> SessionState {
        if self.request.locator().is_none() {
            warn!("Session {} rejected: no image URL provided", self.id);
            return SessionState::Finished(TaskOutcome::failed(FailureReason::InvalidInput));
        }

        SessionState::Submitting
    }

    async fn submit<P>(&self, provider: &P) -> SessionState
    where
        P: ConversionProvider + ?Sized,
    {
        match provider.create_task(&self.request).await {
            Ok(handle) => {
                info!("Session {} submitted as provider job {}", self.id, handle);
                SessionState::Polling { handle }
            }
            Err(e) => {
                if e.is_client_error() {
                    warn!("Session {}: provider rejected the job: {}", self.id, e);
                } else {
                    warn!("Session {}: job submission failed: {}", self.id, e);
                }
                SessionState::Finished(TaskOutcome::failed(FailureReason::SubmissionError))
            }
        }
    }

    /// Issues poll number `attempt` and decides the next state
    async fn poll<P>(&self, provider: &P, handle: &JobHandle, attempt: u32) -> SessionState
    where
        P: ConversionProvider + ?Sized,
    {
        match provider.task_status(handle).await {
            Ok(JobStatus::Succeeded { results }) => match self.preference.select(&results) {
                Some(locator) => {
                    info!(
                        "Session {}: job {} succeeded after {} poll(s)",
                        self.id, handle, attempt
                    );
                    SessionState::Finished(TaskOutcome::completed(locator))
                }
                None => {
                    warn!(
                        "Session {}: job {} succeeded without any of {:?} (got {:?})",
                        self.id,
                        handle,
                        self.preference.formats(),
                        results.keys().collect::<Vec<_>>()
                    );
                    SessionState::Finished(TaskOutcome::failed(FailureReason::MissingResult))
                }
            },
            Ok(JobStatus::Failed { message }) => {
                warn!(
                    "Session {}: provider reported job {} as failed: {}",
                    self.id,
                    handle,
                    message.as_deref().unwrap_or("no details")
                );
                SessionState::Finished(TaskOutcome::failed(
                    FailureReason::ProviderReportedFailure,
                ))
            }
            Ok(JobStatus::Pending) => {
                debug!(
                    "Session {}: job {} still pending (attempt {}/{})",
                    self.id, handle, attempt, self.policy.max_attempts
                );
                self.keep_polling(handle, attempt)
            }
            Err(e) => {
                warn!(
                    "Session {}: status query for job {} failed (attempt {}/{}): {}",
                    self.id, handle, attempt, self.policy.max_attempts, e
                );
                self.keep_polling(handle, attempt)
            }
        }
    }

    fn keep_polling(&self, handle: &JobHandle, attempt: u32) -> SessionState {
        if attempt >= self.policy.max_attempts {
            return self.timed_out(handle);
        }

        SessionState::Polling {
            handle: handle.clone(),
        }
    }

    fn timed_out(&self, handle: &JobHandle) -> SessionState {
        info!(
            "Session {}: job {} timed out after {} attempt(s)",
            self.id, handle, self.policy.max_attempts
        );
        SessionState::Finished(TaskOutcome::TimedOut)
    }
}
