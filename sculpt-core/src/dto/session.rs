//! Session DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response to a session submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: Uuid,
}
