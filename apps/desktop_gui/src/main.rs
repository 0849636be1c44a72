mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, ClientSettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::FeedApp;

#[derive(Parser, Debug)]
#[command(name = "random-feed-gui", about = "Browse randomly generated user profiles")]
struct Args {
    /// Random user API endpoint; overrides random_feed.toml and APP__ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,
    /// Profiles fetched on startup (1-100)
    #[arg(long)]
    batch_size: Option<u32>,
    /// Transport timeout in seconds; 0 disables it
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

impl Args {
    fn apply(self, mut settings: ClientSettings) -> ClientSettings {
        if let Some(endpoint) = self.endpoint {
            settings.endpoint = endpoint;
        }
        if let Some(batch_size) = self.batch_size {
            settings.default_batch_size = batch_size;
        }
        if let Some(timeout) = self.request_timeout_secs {
            settings.request_timeout_secs = timeout;
        }
        settings
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Args::parse().apply(load_settings());
    tracing::info!(
        endpoint = %settings.endpoint,
        default_batch_size = settings.default_batch_size,
        "starting random feed desktop gui"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    let default_batch_size = settings.batch_size();
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Random Users")
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Random Users",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(FeedApp::new(cmd_tx, ui_rx, default_batch_size)))
        }),
    )
}
