//! Pure projection from [`FeedState`] to what a renderer draws.

use shared::domain::Profile;

use crate::feed::FeedState;

pub const LOAD_MORE_LABEL: &str = "Load More Users";
pub const LOAD_MORE_BUSY_LABEL: &str = "Loading...";
pub const RESET_LABEL: &str = "Reset";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    /// First fetch still outstanding; nothing to show yet.
    Loading,
    Feed(FeedPanel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPanel {
    pub error_banner: Option<String>,
    pub cards: Vec<ProfileCard>,
    pub batch_size_input: i64,
    pub validation_message: Option<String>,
    pub load_more: TriggerView,
    pub reset: TriggerView,
    pub status_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    /// `"{uuid}-{index}"`; unique even when upstream repeats a uuid.
    pub key: String,
    pub display_name: String,
    pub email: String,
    pub picture_url: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerView {
    pub label: &'static str,
    pub enabled: bool,
    pub busy: bool,
}

pub fn render_feed(state: &FeedState) -> FeedView {
    if state.is_fetching() && state.profiles().is_empty() {
        return FeedView::Loading;
    }

    let validation_message = state.validation_error().map(|err| err.to_string());
    let can_fetch = state.can_fetch();

    FeedView::Feed(FeedPanel {
        error_banner: state.last_error().map(str::to_owned),
        cards: state
            .profiles()
            .iter()
            .enumerate()
            .map(|(index, profile)| profile_card(index, profile))
            .collect(),
        batch_size_input: state.requested_batch_size(),
        validation_message,
        load_more: TriggerView {
            label: if state.is_fetching() {
                LOAD_MORE_BUSY_LABEL
            } else {
                LOAD_MORE_LABEL
            },
            enabled: can_fetch,
            busy: state.is_fetching(),
        },
        reset: TriggerView {
            label: RESET_LABEL,
            enabled: can_fetch,
            busy: false,
        },
        status_line: status_line(state),
    })
}

pub fn card_key(index: usize, profile: &Profile) -> String {
    format!("{}-{index}", profile.id)
}

fn profile_card(index: usize, profile: &Profile) -> ProfileCard {
    ProfileCard {
        key: card_key(index, profile),
        display_name: profile.display_name(),
        email: profile.email.clone(),
        picture_url: profile.picture_url().to_owned(),
        location: profile.location.as_ref().map(|location| location.label()),
    }
}

fn status_line(state: &FeedState) -> String {
    let count = state.profiles().len();
    let noun = if count == 1 { "profile" } else { "profiles" };
    match state.last_fetched_at() {
        Some(at) => format!("{count} {noun} loaded, last updated {}", at.format("%H:%M:%S")),
        None => format!("{count} {noun} loaded"),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
