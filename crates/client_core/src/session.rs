//! Async driver that runs controller requests against a profile source in order.

use crate::{
    feed::{FeedController, FeedState, FetchRequest},
    types::BatchSize,
    view::{render_feed, FeedView},
    ProfileSource,
};

pub struct FeedSession<S: ProfileSource> {
    controller: FeedController,
    source: S,
}

impl<S: ProfileSource> FeedSession<S> {
    pub fn new(source: S, default_batch_size: BatchSize) -> Self {
        Self {
            controller: FeedController::new(default_batch_size),
            source,
        }
    }

    pub fn state(&self) -> &FeedState {
        self.controller.state()
    }

    pub fn view(&self) -> FeedView {
        render_feed(self.controller.state())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn set_requested_batch_size(&mut self, value: i64) {
        self.controller.set_requested_batch_size(value);
    }

    /// Returns whether a fetch was issued.
    pub async fn initialize(&mut self) -> bool {
        let request = self.controller.initialize();
        self.drive(request).await
    }

    pub async fn load_more(&mut self) -> bool {
        let request = self.controller.load_more();
        self.drive(request).await
    }

    pub async fn reset(&mut self) -> bool {
        let request = self.controller.reset();
        self.drive(request).await
    }

    async fn drive(&mut self, request: Option<FetchRequest>) -> bool {
        let Some(request) = request else {
            return false;
        };
        let outcome = self.source.fetch_profiles(request.count).await;
        self.controller.complete_fetch(outcome);
        true
    }
}
