//! Backend worker: owns the tokio runtime and the HTTP client, turns queued
//! commands into network calls, and posts their outcomes back as [`UiEvent`]s.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{ClientSettings, FetchError, ProfileSource, RandomUserClient};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::app::decode_preview_image;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || run_worker(cmd_rx, ui_tx, settings));
}

fn build_worker(
    settings: &ClientSettings,
) -> anyhow::Result<(tokio::runtime::Runtime, Arc<RandomUserClient>)> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build backend runtime")?;
    let client = RandomUserClient::from_settings(settings)?;
    Ok((runtime, Arc::new(client)))
}

fn run_worker(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));

    let (runtime, client) = match build_worker(&settings) {
        Ok(worker) => worker,
        Err(err) => {
            let message = format!("backend worker startup failure: {err:#}");
            tracing::error!("{message}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                message.clone(),
            )));
            reject_commands(&cmd_rx, &ui_tx, &message);
            return;
        }
    };
    tracing::info!(endpoint = %client.endpoint(), "backend worker ready");

    for cmd in cmd_rx.iter() {
        match cmd {
            BackendCommand::FetchProfiles { request } => {
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                runtime.spawn(async move {
                    let event = match client.fetch_profiles(request.count).await {
                        Ok(profiles) => UiEvent::ProfilesFetched { request, profiles },
                        Err(error) => UiEvent::ProfilesFailed { request, error },
                    };
                    // The feed stays in its fetching state until this arrives, so wait for
                    // queue space off the async workers rather than drop it.
                    let delivered = tokio::task::spawn_blocking(move || ui_tx.send(event).is_ok())
                        .await
                        .unwrap_or(false);
                    if !delivered {
                        tracing::debug!("ui event queue closed; dropping fetch outcome");
                    }
                });
            }
            BackendCommand::FetchPicture { url } => {
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                runtime.spawn(async move {
                    let event = match load_picture(&client, &url).await {
                        Ok(image) => UiEvent::PictureLoaded { url, image },
                        Err(reason) => UiEvent::PictureFailed { url, reason },
                    };
                    send_best_effort(&ui_tx, event);
                });
            }
        }
    }

    tracing::info!("command queue closed; backend worker exiting");
}

async fn load_picture(
    client: &RandomUserClient,
    url: &str,
) -> Result<crate::ui::app::PreviewImage, String> {
    let bytes = client
        .fetch_picture(url)
        .await
        .map_err(|err| err.to_string())?;
    tokio::task::spawn_blocking(move || decode_preview_image(&bytes))
        .await
        .map_err(|err| format!("picture decode task failed: {err}"))?
}

/// Answers every queued command with a failure so the UI never waits on a dead worker.
fn reject_commands(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, reason: &str) {
    for cmd in cmd_rx.iter() {
        let event = match cmd {
            BackendCommand::FetchProfiles { request } => UiEvent::ProfilesFailed {
                request,
                error: FetchError::Dispatch(reason.to_string()),
            },
            BackendCommand::FetchPicture { url } => UiEvent::PictureFailed {
                url,
                reason: reason.to_string(),
            },
        };
        if ui_tx.send(event).is_err() {
            return;
        }
    }
}

fn send_best_effort(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            tracing::warn!("ui event queue is full; dropping picture event");
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue closed; dropping picture event");
        }
    }
}
