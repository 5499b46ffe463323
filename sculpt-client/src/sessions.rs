//! Session API endpoints

use crate::OrchestratorClient;
use crate::error::Result;
use sculpt_core::domain::session::SessionStatus;
use sculpt_core::dto::convert::{ConvertRequest, ConvertResponse};
use sculpt_core::dto::session::SessionCreated;
use uuid::Uuid;

impl OrchestratorClient {
    /// Start a background conversion
    ///
    /// # Returns
    /// The id of the new session
    pub async fn submit_session(&self, req: ConvertRequest) -> Result<Uuid> {
        let url = format!("{}/api/sessions", self.base_url);
        let response = self.client.post(&url).json(&req).send().await?;

        let created: SessionCreated = self.handle_response(response).await?;
        Ok(created.session_id)
    }

    /// Get the current status of a session
    pub async fn get_session(&self, id: Uuid) -> Result<SessionStatus> {
        let url = format!("{}/api/sessions/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// List all sessions known to the orchestrator
    pub async fn list_sessions(&self) -> Result<Vec<SessionStatus>> {
        let url = format!("{}/api/sessions", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Wait for a session to finish and return its model
    pub async fn await_session(&self, id: Uuid) -> Result<ConvertResponse> {
        let url = format!("{}/api/sessions/{}/outcome", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Cancel a running session
    pub async fn cancel_session(&self, id: Uuid) -> Result<()> {
        let url = format!("{}/api/sessions/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
