//! Blocking conversion endpoint

use crate::OrchestratorClient;
use crate::error::Result;
use sculpt_core::dto::convert::{ConvertRequest, ConvertResponse};

impl OrchestratorClient {
    /// Convert an image and wait for the resulting model
    ///
    /// The call returns only once the orchestrator's session has ended, which
    /// can take as long as its whole polling budget.
    ///
    /// # Errors
    /// Failed, timed-out or rejected conversions come back as
    /// [`ClientError::ApiError`](crate::ClientError::ApiError) carrying the
    /// orchestrator's reason code.
    pub async fn convert(&self, req: ConvertRequest) -> Result<ConvertResponse> {
        let url = format!("{}/api/image-to-3d", self.base_url);
        tracing::debug!("Requesting conversion of {:?}", req.image_url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }
}
