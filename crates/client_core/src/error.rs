use thiserror::Error;

use crate::types::{MAX_BATCH_SIZE, MIN_BATCH_SIZE};

/// Failure of a single profile fetch. Recorded into the feed's error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },
    #[error("malformed response payload: {0}")]
    Decode(String),
    #[error("fetch could not be dispatched: {0}")]
    Dispatch(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                message: None,
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Locally rejected batch size. Never reaches the network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BatchSizeError {
    #[error(
        "batch size must be between {min} and {max} (got {value})",
        min = MIN_BATCH_SIZE,
        max = MAX_BATCH_SIZE
    )]
    OutOfRange { value: i64 },
}
