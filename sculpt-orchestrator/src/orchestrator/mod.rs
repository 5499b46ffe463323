//! Task orchestrator
//!
//! Drives a [`PollSession`] from submission to a terminal outcome. The
//! driver owns all timing: it waits the session's requested delay before each
//! polling step and races that delay against the session's cancellation token.
//!
//! Sessions share nothing with each other, so any number of them may be
//! driven concurrently from the same orchestrator.

pub mod policy;
pub mod session;

pub use policy::{PollPolicy, ResultPreference};
pub use session::{PollSession, SessionState};

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use sculpt_core::domain::job::JobRequest;
use sculpt_core::domain::outcome::TaskOutcome;

use crate::provider::ConversionProvider;

/// Runs image-to-3D conversions against a provider
pub struct TaskOrchestrator {
    provider: Arc<dyn ConversionProvider>,
    policy: PollPolicy,
    preference: ResultPreference,
}

impl TaskOrchestrator {
    pub fn new(
        provider: Arc<dyn ConversionProvider>,
        policy: PollPolicy,
        preference: ResultPreference,
    ) -> Self {
        Self {
            provider,
            policy,
            preference,
        }
    }

    /// Creates a fresh session for `request` using this orchestrator's policies
    pub fn session(&self, id: Uuid, request: JobRequest) -> PollSession {
        PollSession::new(id, request, self.policy, self.preference.clone())
    }

    /// Converts one request and waits for its outcome
    ///
    /// Expected failures come back as [`TaskOutcome`] values, never as errors.
    pub async fn run(&self, request: JobRequest) -> TaskOutcome {
        let session = self.session(Uuid::new_v4(), request);
        self.drive(session, &CancellationToken::new(), |_| {}).await
    }

    /// Drives `session` to completion
    ///
    /// `observe` is called after every transition. Cancelling `cancel` ends the
    /// session as [`TaskOutcome::Cancelled`] at its next check point; an
    /// in-flight provider call is allowed to finish first.
    pub async fn drive<F>(
        &self,
        mut session: PollSession,
        cancel: &CancellationToken,
        mut observe: F,
    ) -> TaskOutcome
    where
        F: FnMut(&PollSession) + Send,
    {
        loop {
            if let Some(outcome) = session.outcome() {
                info!(
                    "Session {} finished with {} after {} poll(s)",
                    session.id(),
                    outcome.code(),
                    session.attempts()
                );
                return outcome.clone();
            }

            if cancel.is_cancelled() {
                session.cancel();
                observe(&session);
                continue;
            }

            if let Some(delay) = session.delay_before_step() {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        session.cancel();
                        observe(&session);
                        continue;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            session.step(self.provider.as_ref()).await;
            observe(&session);
        }
    }
}
