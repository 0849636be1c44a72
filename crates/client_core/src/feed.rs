//! Feed controller: single-writer state for the accumulated profile list.
//!
//! The controller never performs I/O. Starting a fetch hands back a
//! [`FetchRequest`]; the owner runs it against a [`crate::ProfileSource`] and
//! reports the outcome through [`FeedController::complete_fetch`]. At most one
//! request is outstanding at any time.

use chrono::{DateTime, Local};
use shared::{domain::Profile, protocol::RawProfile};
use tracing::{debug, info, warn};

use crate::{
    error::{BatchSizeError, FetchError},
    types::BatchSize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    Initial,
    LoadMore,
    Reset,
}

impl FetchReason {
    pub fn label(self) -> &'static str {
        match self {
            FetchReason::Initial => "initial",
            FetchReason::LoadMore => "load_more",
            FetchReason::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub count: BatchSize,
    pub reason: FetchReason,
}

#[derive(Debug, Clone)]
pub struct FeedState {
    profiles: Vec<Profile>,
    requested_batch_size: i64,
    is_fetching: bool,
    last_error: Option<String>,
    last_fetched_at: Option<DateTime<Local>>,
}

impl FeedState {
    fn new(default_batch_size: BatchSize) -> Self {
        Self {
            profiles: Vec::new(),
            requested_batch_size: default_batch_size.into(),
            is_fetching: false,
            last_error: None,
            last_fetched_at: None,
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn requested_batch_size(&self) -> i64 {
        self.requested_batch_size
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Local>> {
        self.last_fetched_at
    }

    pub fn batch_size(&self) -> Result<BatchSize, BatchSizeError> {
        BatchSize::new(self.requested_batch_size)
    }

    /// Out-of-range message for the current input, if any.
    pub fn validation_error(&self) -> Option<BatchSizeError> {
        self.batch_size().err()
    }

    pub fn can_fetch(&self) -> bool {
        !self.is_fetching && self.validation_error().is_none()
    }
}

#[derive(Debug)]
pub struct FeedController {
    state: FeedState,
    initialized: bool,
    pending: Option<FetchRequest>,
}

impl FeedController {
    pub fn new(default_batch_size: BatchSize) -> Self {
        Self {
            state: FeedState::new(default_batch_size),
            initialized: false,
            pending: None,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn pending_request(&self) -> Option<FetchRequest> {
        self.pending
    }

    /// Takes effect on the next fetch; an outstanding one keeps its count.
    pub fn set_requested_batch_size(&mut self, value: i64) {
        self.state.requested_batch_size = value;
    }

    /// First fetch on activation. Later calls are ignored.
    pub fn initialize(&mut self) -> Option<FetchRequest> {
        if self.initialized {
            warn!("feed controller already initialized; ignoring");
            return None;
        }
        self.initialized = true;
        self.begin_fetch(FetchReason::Initial)
    }

    pub fn load_more(&mut self) -> Option<FetchRequest> {
        self.begin_fetch(FetchReason::LoadMore)
    }

    /// Discards every profile and fetches a fresh batch. The list stays empty if that fetch fails.
    pub fn reset(&mut self) -> Option<FetchRequest> {
        let count = self.admit(FetchReason::Reset)?;
        let discarded = self.state.profiles.len();
        self.state.profiles.clear();
        debug!(discarded, "feed cleared for reset");
        Some(self.start(count, FetchReason::Reset))
    }

    /// Applies the outcome of the outstanding request.
    pub fn complete_fetch(&mut self, outcome: Result<Vec<RawProfile>, FetchError>) {
        let Some(request) = self.pending.take() else {
            warn!("fetch completion arrived with no request outstanding; dropping it");
            return;
        };

        match outcome {
            Ok(raw) => {
                let limit = request.count.get() as usize;
                if raw.len() > limit {
                    warn!(
                        requested = limit,
                        received = raw.len(),
                        "upstream returned more profiles than requested; truncating"
                    );
                }
                let before = self.state.profiles.len();
                self.state
                    .profiles
                    .extend(raw.into_iter().take(limit).map(Profile::from));
                self.state.last_fetched_at = Some(Local::now());
                info!(
                    reason = request.reason.label(),
                    added = self.state.profiles.len() - before,
                    total = self.state.profiles.len(),
                    "profile batch applied"
                );
            }
            Err(err) => {
                warn!(reason = request.reason.label(), "profile fetch failed: {err}");
                self.state.last_error = Some(err.to_string());
            }
        }

        self.state.is_fetching = false;
    }

    fn begin_fetch(&mut self, reason: FetchReason) -> Option<FetchRequest> {
        let count = self.admit(reason)?;
        Some(self.start(count, reason))
    }

    fn admit(&self, reason: FetchReason) -> Option<BatchSize> {
        if self.state.is_fetching {
            debug!(
                reason = reason.label(),
                "fetch already outstanding; refusing to start another"
            );
            return None;
        }
        match self.state.batch_size() {
            Ok(count) => Some(count),
            Err(err) => {
                debug!(reason = reason.label(), "fetch rejected: {err}");
                None
            }
        }
    }

    fn start(&mut self, count: BatchSize, reason: FetchReason) -> FetchRequest {
        self.state.is_fetching = true;
        self.state.last_error = None;
        let request = FetchRequest { count, reason };
        self.pending = Some(request);
        request
    }
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
