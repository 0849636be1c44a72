//! UI layer for desktop GUI: app shell and feed widgets.

pub mod app;
pub mod widgets;

pub use app::FeedApp;
