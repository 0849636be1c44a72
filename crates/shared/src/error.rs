use serde::Deserialize;
use thiserror::Error;

/// Error body the random user API returns alongside a non-success status.
#[derive(Debug, Clone, Deserialize, Error)]
#[error("{error}")]
pub struct UpstreamError {
    pub error: String,
}

impl UpstreamError {
    /// Parses an error body, returning `None` when the body is not the API's error shape.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|parsed| !parsed.error.trim().is_empty())
    }
}
