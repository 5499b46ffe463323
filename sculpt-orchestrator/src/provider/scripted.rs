//! Scripted in-memory provider used by tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use sculpt_core::domain::job::{JobHandle, JobRequest, JobStatus, ResultLocators};

use crate::provider::ConversionProvider;
use crate::provider::error::{ProviderError, ProviderResult};

/// One scripted answer to a status query
#[derive(Debug, Clone)]
pub enum Reply {
    Pending,
    /// Transport-level failure of the status call itself
    Transient,
    Succeeded(Vec<(&'static str, &'static str)>),
    Failed,
}

/// Provider that replays a fixed script and counts calls
///
/// Once the script runs out every further poll reports `Pending`.
pub struct ScriptedProvider {
    handle: Option<&'static str>,
    panic_on_submit: bool,
    replies: Mutex<VecDeque<Reply>>,
    submissions: AtomicU32,
    polls: AtomicU32,
    polled_handles: Mutex<Vec<JobHandle>>,
}

impl ScriptedProvider {
    /// Submission succeeds with `handle`
    pub fn accepting(handle: &'static str, replies: Vec<Reply>) -> Self {
        Self {
            handle: Some(handle),
            panic_on_submit: false,
            replies: Mutex::new(replies.into()),
            submissions: AtomicU32::new(0),
            polls: AtomicU32::new(0),
            polled_handles: Mutex::new(Vec::new()),
        }
    }

    /// Submission fails with a 500
    pub fn rejecting() -> Self {
        Self {
            handle: None,
            ..Self::accepting("unused", Vec::new())
        }
    }

    /// Submission panics, killing whatever task drives the session
    pub fn panicking() -> Self {
        Self {
            panic_on_submit: true,
            ..Self::accepting("unused", Vec::new())
        }
    }

    pub fn submissions(&self) -> u32 {
        self.submissions.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn polled_handles(&self) -> Vec<JobHandle> {
        self.polled_handles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversionProvider for ScriptedProvider {
    async fn create_task(&self, _request: &JobRequest) -> ProviderResult<JobHandle> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_submit {
            panic!("scripted provider crashed");
        }
        match self.handle {
            Some(handle) => Ok(JobHandle::new(handle)),
            None => Err(ProviderError::api_error(500, "internal error")),
        }
    }

    async fn task_status(&self, handle: &JobHandle) -> ProviderResult<JobStatus> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.polled_handles.lock().unwrap().push(handle.clone());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Pending);

        match reply {
            Reply::Pending => Ok(JobStatus::Pending),
            Reply::Transient => Err(ProviderError::api_error(503, "unavailable")),
            Reply::Succeeded(locators) => Ok(JobStatus::Succeeded {
                results: locators
                    .into_iter()
                    .map(|(format, url)| (format.to_string(), url.to_string()))
                    .collect::<ResultLocators>(),
            }),
            Reply::Failed => Ok(JobStatus::Failed {
                message: Some("scripted failure".to_string()),
            }),
        }
    }
}
