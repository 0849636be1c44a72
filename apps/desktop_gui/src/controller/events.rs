//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{FetchError, FetchRequest};
use shared::protocol::RawProfile;

use crate::ui::app::PreviewImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    ProfilesFetched {
        request: FetchRequest,
        profiles: Vec<RawProfile>,
    },
    ProfilesFailed {
        request: FetchRequest,
        error: FetchError,
    },
    PictureLoaded {
        url: String,
        image: PreviewImage,
    },
    PictureFailed {
        url: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Upstream,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchProfiles,
    FetchPicture,
    Clipboard,
}

/// Status-line text for a failed profile fetch.
pub fn classify_fetch_failure(err: &FetchError) -> String {
    match err {
        FetchError::Transport(message) => {
            let lower = message.to_ascii_lowercase();
            if lower.contains("timed out") || lower.contains("timeout") {
                "Random user API timed out; try again.".to_string()
            } else {
                "Random user API unreachable; check your network and try again.".to_string()
            }
        }
        FetchError::Status { status, .. } if *status >= 500 => {
            format!("Random user API is having trouble (HTTP {status}); try again later.")
        }
        FetchError::Status { status, .. } => {
            format!("Random user API rejected the request (HTTP {status}).")
        }
        FetchError::Decode(_) => {
            "Random user API sent a response that could not be read.".to_string()
        }
        FetchError::Dispatch(_) => {
            "Backend worker is unavailable (possible startup/runtime failure).".to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("must be between")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("http 4")
            || message_lower.contains("http 5")
            || message_lower.contains("upstream")
        {
            UiErrorCategory::Upstream
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("dns")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_fetch_error(context: UiErrorContext, err: &FetchError) -> Self {
        let category = match err {
            FetchError::Transport(_) | FetchError::Dispatch(_) => UiErrorCategory::Transport,
            FetchError::Status { .. } => UiErrorCategory::Upstream,
            FetchError::Decode(_) => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Upstream => "Upstream",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
