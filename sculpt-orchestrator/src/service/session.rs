//! Session Service
//!
//! Runs conversions in the background so callers do not have to hold a
//! connection open for the whole polling budget. Each submitted session gets
//! its own task; the service only keeps the latest status snapshot and the
//! cancellation token for it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use sculpt_core::domain::job::JobRequest;
use sculpt_core::domain::session::SessionStatus;

use crate::orchestrator::TaskOrchestrator;

/// Service error type
#[derive(Debug)]
pub enum SessionError {
    NotFound(Uuid),
    AlreadyFinished(Uuid),
    InvalidInput(String),
    Internal(String),
}

struct SessionEntry {
    status: watch::Receiver<SessionStatus>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SessionEntry {
    /// Latest snapshot, or an error if the session task died before finishing
    fn snapshot(&self, id: Uuid) -> Result<SessionStatus, SessionError> {
        let status = self.status.borrow().clone();

        if !status.phase.is_terminal() && self.task.is_finished() {
            return Err(SessionError::Internal(format!(
                "Session {} stopped unexpectedly",
                id
            )));
        }

        Ok(status)
    }
}

/// Registry of background conversion sessions
pub struct SessionService {
    orchestrator: Arc<TaskOrchestrator>,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    /// How long finished sessions stay queryable
    retention: Duration,
}

impl SessionService {
    pub fn new(orchestrator: Arc<TaskOrchestrator>, retention: Duration) -> Self {
        Self {
            orchestrator,
            sessions: RwLock::new(HashMap::new()),
            retention,
        }
    }

    /// Validate a request and start a background session for it
    pub async fn submit(&self, request: JobRequest) -> Result<Uuid, SessionError> {
        if request.locator().is_none() {
            return Err(SessionError::InvalidInput(
                "No image URL provided".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let session = self.orchestrator.session(id, request);
        let (tx, rx) = watch::channel(session.status());
        let cancel = CancellationToken::new();

        let orchestrator = Arc::clone(&self.orchestrator);
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            orchestrator
                .drive(session, &token, |s| {
                    tx.send_replace(s.status());
                })
                .await;
        });

        let mut sessions = self.sessions.write().await;
        self.prune(&mut sessions);
        sessions.insert(
            id,
            SessionEntry {
                status: rx,
                cancel,
                task,
            },
        );

        tracing::info!("Session {} started", id);

        Ok(id)
    }

    /// Get the current status of a session
    pub async fn status(&self, id: Uuid) -> Result<SessionStatus, SessionError> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        entry.snapshot(id)
    }

    /// List all known sessions, oldest first
    pub async fn list(&self) -> Vec<SessionStatus> {
        let sessions = self.sessions.read().await;
        let mut statuses: Vec<SessionStatus> = sessions
            .values()
            .map(|entry| entry.status.borrow().clone())
            .collect();
        statuses.sort_by_key(|status| status.created_at);
        statuses
    }

    /// Wait until a session reaches a terminal phase
    pub async fn wait(&self, id: Uuid) -> Result<SessionStatus, SessionError> {
        let mut status = {
            let sessions = self.sessions.read().await;
            let entry = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
            entry.status.clone()
        };

        let finished = status
            .wait_for(|status| status.phase.is_terminal())
            .await
            .map_err(|_| {
                SessionError::Internal(format!("Session {} stopped unexpectedly", id))
            })?;

        Ok(finished.clone())
    }

    /// Request cancellation of a running session
    pub async fn cancel(&self, id: Uuid) -> Result<(), SessionError> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(&id).ok_or(SessionError::NotFound(id))?;

        if entry.snapshot(id)?.phase.is_terminal() {
            return Err(SessionError::AlreadyFinished(id));
        }

        entry.cancel.cancel();
        tracing::info!("Cancellation requested for session {}", id);

        Ok(())
    }

    /// Drop finished sessions older than the retention window
    fn prune(&self, sessions: &mut HashMap<Uuid, SessionEntry>) {
        let Some(cutoff) = chrono::Duration::from_std(self.retention)
            .ok()
            .and_then(|retention| chrono::Utc::now().checked_sub_signed(retention))
        else {
            return;
        };

        sessions.retain(|id, entry| {
            let keep = match entry.status.borrow().finished_at {
                Some(finished_at) => finished_at > cutoff,
                None => !entry.task.is_finished(),
            };
            if !keep {
                tracing::debug!("Pruning session {}", id);
            }
            keep
        });
    }
}
