//! Provider Module
//!
//! Boundary to the external compute provider that performs the actual
//! image-to-3D conversion. The orchestrator only depends on the
//! [`ConversionProvider`] trait; [`MeshyProvider`] is the HTTP implementation.

pub mod error;
pub mod meshy;
#[cfg(test)]
pub mod scripted;

pub use error::{ProviderError, ProviderResult};
pub use meshy::MeshyProvider;

use async_trait::async_trait;
use sculpt_core::domain::job::{JobHandle, JobRequest, JobStatus};

/// Remote service that accepts conversion jobs and reports on them
#[async_trait]
pub trait ConversionProvider: Send + Sync {
    /// Submits a job and returns the provider's handle for it
    ///
    /// Any error means the job was not accepted.
    async fn create_task(&self, request: &JobRequest) -> ProviderResult<JobHandle>;

    /// Queries the current status of a previously submitted job
    ///
    /// Errors are transport-level failures of this single query; they say
    /// nothing about the job itself.
    async fn task_status(&self, handle: &JobHandle) -> ProviderResult<JobStatus>;
}
