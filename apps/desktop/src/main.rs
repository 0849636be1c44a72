use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, ClientSettings, FeedPanel, FeedSession, FeedView, RandomUserClient,
};
use shared::domain::Profile;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "random-feed", about = "Fetch random user profiles and print the feed")]
struct Args {
    /// Random user API endpoint; overrides random_feed.toml and APP__ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,
    /// Profiles per fetch (1-100)
    #[arg(long)]
    batch_size: Option<i64>,
    /// Additional "load more" rounds after the initial fetch
    #[arg(long, default_value_t = 0)]
    more: u32,
    /// Discard everything and fetch one fresh batch at the end
    #[arg(long)]
    reset: bool,
    /// Print profiles as JSON instead of the rendered feed
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self, mut settings: ClientSettings) -> ClientSettings {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = args.settings(load_settings());
    let client = RandomUserClient::from_settings(&settings)?;
    let mut session = FeedSession::new(client, settings.batch_size());

    if let Some(batch_size) = args.batch_size {
        session.set_requested_batch_size(batch_size);
        if let Some(err) = session.state().validation_error() {
            bail!("{err}");
        }
    }

    session.initialize().await;
    for _ in 0..args.more {
        session.load_more().await;
    }
    if args.reset {
        session.reset().await;
    }
    tracing::info!(
        profiles = session.state().profiles().len(),
        endpoint = %session.source().endpoint(),
        "feed ready"
    );

    if args.json {
        println!("{}", profiles_json(session.state().profiles())?);
    } else {
        match session.view() {
            FeedView::Loading => println!("Loading"),
            FeedView::Feed(panel) => print!("{}", render_text(&panel)),
        }
    }

    if let Some(err) = session.state().last_error() {
        bail!("last fetch failed: {err}");
    }
    Ok(())
}

fn profiles_json(profiles: &[Profile]) -> Result<String> {
    serde_json::to_string_pretty(profiles).context("failed to serialize profiles")
}

fn render_text(panel: &FeedPanel) -> String {
    let mut out = String::from("Random Users\n\n");
    if let Some(error) = &panel.error_banner {
        out.push_str(&format!("! {error}\n\n"));
    }
    for (position, card) in panel.cards.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} <{}>\n",
            position + 1,
            card.display_name,
            card.email
        ));
        if let Some(location) = &card.location {
            out.push_str(&format!("     {location}\n"));
        }
        out.push_str(&format!("     {}\n", card.picture_url));
    }
    if let Some(message) = &panel.validation_message {
        out.push_str(&format!("\n{message}\n"));
    }
    out.push_str(&format!("\n{}\n", panel.status_line));
    out
}
