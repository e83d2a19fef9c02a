//! Recipe critique payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A recipe rendered as text by the client.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CritiqueRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CritiqueResponse {
    /// The model's critique, typically three lines
    pub response: String,
}
