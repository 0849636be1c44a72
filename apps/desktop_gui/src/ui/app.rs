use arboard::Clipboard;
use client_core::{render_feed, BatchSize, FeedPanel, FeedView};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{FeedUiState, PictureState};
use crate::ui::widgets::{self, CardPicture};

const PICTURE_MAX_EDGE: u32 = 256;

#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic
        .thumbnail(PICTURE_MAX_EDGE, PICTURE_MAX_EDGE)
        .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

pub struct FeedApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: FeedUiState,
    batch_size_draft: String,
}

impl FeedApp {
    /// Builds the app and issues the activation fetch before any user input is handled.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        default_batch_size: BatchSize,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: FeedUiState::new(default_batch_size),
            batch_size_draft: default_batch_size.to_string(),
        };
        let initial = app.state.activate();
        app.queue(initial);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn queue(&mut self, cmd: Option<BackendCommand>) {
        let Some(cmd) = cmd else {
            return;
        };
        if let Err((cmd, failure)) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.state.dispatch_failed(cmd, failure);
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
            Ok(()) => self.state.status = format!("Copied {text} to clipboard"),
            Err(err) => {
                let err = UiError::from_message(UiErrorContext::Clipboard, err.to_string());
                tracing::warn!("clipboard copy failed: {}", err.message());
                self.state.status = format!("Couldn't copy to clipboard: {}", err.message());
            }
        }
    }

    fn card_picture(&mut self, ctx: &egui::Context, key: &str, url: &str) -> CardPicture {
        match self.state.pictures.get_mut(url) {
            Some(PictureState::Ready { image, texture }) => {
                let texture = texture.get_or_insert_with(|| {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    ctx.load_texture(
                        format!("profile_picture_{key}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    )
                });
                CardPicture::Ready(texture.clone())
            }
            Some(PictureState::Loading) => CardPicture::Loading,
            Some(PictureState::Failed(reason)) => CardPicture::Unavailable(reason.clone()),
            None => {
                let cmd = self.state.request_picture(url);
                self.queue(cmd);
                CardPicture::Loading
            }
        }
    }

    fn show_loading_screen(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::loading_screen(ui);
        });
    }

    fn show_feed(&mut self, ctx: &egui::Context, panel: FeedPanel) {
        let mut load_more_clicked = false;
        let mut reset_clicked = false;
        let mut copy_email: Option<String> = None;

        let pictures: Vec<CardPicture> = panel
            .cards
            .iter()
            .map(|card| self.card_picture(ctx, &card.key, &card.picture_url))
            .collect();

        egui::TopBottomPanel::bottom("feed_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&panel.status_line).weak());
                ui.separator();
                ui.label(egui::RichText::new(&self.state.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(
                            egui::RichText::new("Random Users")
                                .size(32.0)
                                .color(widgets::ACCENT),
                        );
                    });
                    ui.add_space(12.0);

                    if let Some(startup_error) = &self.state.startup_error {
                        widgets::error_banner(ui, startup_error);
                        ui.add_space(8.0);
                    }
                    if let Some(error) = &panel.error_banner {
                        widgets::error_banner(ui, error);
                        ui.add_space(8.0);
                    }

                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
                        for (card, picture) in panel.cards.iter().zip(&pictures) {
                            ui.push_id(&card.key, |ui| {
                                if widgets::profile_card(ui, card, picture) {
                                    copy_email = Some(card.email.clone());
                                }
                            });
                        }
                    });
                    ui.add_space(24.0);

                    ui.vertical_centered(|ui| {
                        let input_id = egui::Id::new("batch_size_input");
                        if !ui.memory(|mem| mem.has_focus(input_id)) {
                            sync_batch_size_draft(
                                &mut self.batch_size_draft,
                                panel.batch_size_input,
                            );
                        }
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.batch_size_draft)
                                .id(input_id)
                                .hint_text("Number of users to load")
                                .desired_width(220.0),
                        );
                        if response.changed() {
                            self.state
                                .set_batch_size_input(parse_batch_size_input(&self.batch_size_draft));
                        }
                        if let Some(message) = &panel.validation_message {
                            ui.colored_label(ui.visuals().error_fg_color, message);
                        }
                        ui.add_space(16.0);

                        ui.horizontal(|ui| {
                            load_more_clicked = widgets::trigger_button(ui, &panel.load_more);
                            reset_clicked = widgets::trigger_button(ui, &panel.reset);
                        });
                    });
                });
        });

        if let Some(email) = copy_email {
            self.copy_to_clipboard(&email);
        }
        if load_more_clicked {
            let cmd = self.state.load_more();
            self.queue(cmd);
        }
        if reset_clicked {
            let cmd = self.state.reset();
            self.queue(cmd);
        }
    }
}

/// Empty or non-numeric input counts as zero so it fails range validation.
fn parse_batch_size_input(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// Rewrites the draft when it no longer reflects the controller's value.
fn sync_batch_size_draft(draft: &mut String, requested: i64) {
    if parse_batch_size_input(draft) != requested {
        *draft = requested.to_string();
    }
}

impl eframe::App for FeedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match render_feed(self.state.feed.state()) {
            FeedView::Loading => self.show_loading_screen(ctx),
            FeedView::Feed(panel) => self.show_feed(ctx, panel),
        }

        let fetching = self.state.feed.state().is_fetching()
            || self
                .state
                .pictures
                .values()
                .any(|picture| matches!(picture, PictureState::Loading));
        if fetching {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
