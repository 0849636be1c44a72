use async_trait::async_trait;
use shared::protocol::RawProfile;

pub mod config;
pub mod error;
pub mod feed;
pub mod session;
pub mod transport;
pub mod types;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use error::{BatchSizeError, FetchError};
pub use feed::{FeedController, FeedState, FetchReason, FetchRequest};
pub use session::FeedSession;
pub use transport::RandomUserClient;
pub use types::BatchSize;
pub use view::{render_feed, FeedPanel, FeedView, ProfileCard, TriggerView};

/// Source of raw profile batches. One call is one upstream request, never retried.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profiles(&self, count: BatchSize) -> Result<Vec<RawProfile>, FetchError>;
}

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
