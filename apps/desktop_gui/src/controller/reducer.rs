//! UI-thread state and the transitions applied for user actions and backend events.

use std::collections::HashMap;

use client_core::{BatchSize, FeedController, FetchError, FetchReason};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{
    classify_fetch_failure, err_label, UiError, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::DispatchFailure;
use crate::ui::app::PreviewImage;

pub enum PictureState {
    Loading,
    Ready {
        image: PreviewImage,
        texture: Option<egui::TextureHandle>,
    },
    Failed(String),
}

pub struct FeedUiState {
    pub feed: FeedController,
    pub pictures: HashMap<String, PictureState>,
    pub status: String,
    /// Worker startup failures stay visible above the feed.
    pub startup_error: Option<String>,
}

impl FeedUiState {
    pub fn new(default_batch_size: BatchSize) -> Self {
        Self {
            feed: FeedController::new(default_batch_size),
            pictures: HashMap::new(),
            status: "Starting".to_string(),
            startup_error: None,
        }
    }

    pub fn activate(&mut self) -> Option<BackendCommand> {
        self.status = "Loading profiles".to_string();
        self.feed
            .initialize()
            .map(|request| BackendCommand::FetchProfiles { request })
    }

    pub fn load_more(&mut self) -> Option<BackendCommand> {
        self.feed
            .load_more()
            .map(|request| BackendCommand::FetchProfiles { request })
    }

    pub fn reset(&mut self) -> Option<BackendCommand> {
        let request = self.feed.reset()?;
        self.pictures.clear();
        Some(BackendCommand::FetchProfiles { request })
    }

    pub fn set_batch_size_input(&mut self, value: i64) {
        self.feed.set_requested_batch_size(value);
    }

    /// Marks a picture as loading the first time a card asks for it.
    pub fn request_picture(&mut self, url: &str) -> Option<BackendCommand> {
        if self.pictures.contains_key(url) {
            return None;
        }
        self.pictures.insert(url.to_string(), PictureState::Loading);
        Some(BackendCommand::FetchPicture {
            url: url.to_string(),
        })
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                self.status = format!("{} error: {}", err_label(err.category()), err.message());
                if err.context() == UiErrorContext::BackendStartup {
                    self.startup_error = Some(self.status.clone());
                }
            }
            UiEvent::ProfilesFetched { request, profiles } => {
                tracing::debug!(
                    reason = request.reason.label(),
                    received = profiles.len(),
                    "profile batch delivered to ui"
                );
                let before = self.feed.state().profiles().len();
                self.feed.complete_fetch(Ok(profiles));
                let added = self.feed.state().profiles().len().saturating_sub(before);
                self.status = match request.reason {
                    FetchReason::LoadMore => format!("Added {added} more"),
                    FetchReason::Initial | FetchReason::Reset => {
                        format!("Fetched a fresh batch of {added}")
                    }
                };
            }
            UiEvent::ProfilesFailed { request, error } => {
                let err = UiError::from_fetch_error(UiErrorContext::FetchProfiles, &error);
                tracing::debug!(
                    reason = request.reason.label(),
                    category = err_label(err.category()),
                    "profile fetch failure delivered to ui: {}",
                    err.message()
                );
                self.status = classify_fetch_failure(&error);
                self.feed.complete_fetch(Err(error));
            }
            UiEvent::PictureLoaded { url, image } => {
                // Cache entries are dropped on reset; late pictures are discarded.
                if let Some(slot) = self.pictures.get_mut(&url) {
                    *slot = PictureState::Ready {
                        image,
                        texture: None,
                    };
                }
            }
            UiEvent::PictureFailed { url, reason } => {
                tracing::debug!(%url, "profile picture unavailable: {reason}");
                if let Some(slot) = self.pictures.get_mut(&url) {
                    *slot = PictureState::Failed(reason);
                }
            }
        }
    }

    /// Unwinds a command the backend never received.
    pub fn dispatch_failed(&mut self, cmd: BackendCommand, failure: DispatchFailure) {
        match cmd {
            BackendCommand::FetchProfiles { .. } => {
                let error = FetchError::Dispatch(failure.reason().to_string());
                self.status = classify_fetch_failure(&error);
                self.feed.complete_fetch(Err(error));
            }
            BackendCommand::FetchPicture { url } if failure == DispatchFailure::QueueFull => {
                // Forget the slot so the card asks again on a later frame.
                tracing::debug!(%url, "picture request deferred; command queue is full");
                self.pictures.remove(&url);
            }
            BackendCommand::FetchPicture { url } => {
                let err = UiError::from_message(UiErrorContext::FetchPicture, failure.reason());
                tracing::warn!(%url, category = err_label(err.category()), "{}", err.message());
                self.pictures
                    .insert(url, PictureState::Failed(failure.reason().to_string()));
            }
        }
    }
}
