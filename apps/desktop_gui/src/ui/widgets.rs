//! Drawing helpers for the feed: loading screen, banner, cards and triggers.

use client_core::{ProfileCard, TriggerView};
use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(6, 182, 212);
const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(24, 24, 27);
const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(39, 39, 42);
const CARD_WIDTH: f32 = 260.0;
const PICTURE_SIZE: f32 = 96.0;

pub enum CardPicture {
    Ready(egui::TextureHandle),
    Loading,
    Unavailable(String),
}

pub fn loading_screen(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() * 0.35).max(0.0));
        ui.add(egui::Spinner::new().size(64.0).color(ACCENT));
        ui.add_space(16.0);
        ui.label(egui::RichText::new("Loading").size(24.0).strong());
        ui.label(egui::RichText::new("Please wait while we prepare your content").weak());
    });
}

pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(111, 53, 53))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
        });
}

/// Draws one card. Returns `true` when "Copy email" was chosen from its context menu.
pub fn profile_card(ui: &mut egui::Ui, card: &ProfileCard, picture: &CardPicture) -> bool {
    let frame = egui::Frame::NONE
        .fill(CARD_FILL)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            let picture_size = egui::vec2(PICTURE_SIZE, PICTURE_SIZE);
            match picture {
                CardPicture::Ready(texture) => {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(picture_size));
                }
                CardPicture::Loading => {
                    let (rect, _) = ui.allocate_exact_size(picture_size, egui::Sense::hover());
                    ui.put(
                        egui::Rect::from_center_size(rect.center(), egui::vec2(24.0, 24.0)),
                        egui::Spinner::new(),
                    );
                }
                CardPicture::Unavailable(reason) => {
                    let (rect, response) = ui.allocate_exact_size(picture_size, egui::Sense::hover());
                    ui.painter().rect_filled(rect, 4.0, CARD_STROKE);
                    response.on_hover_text(format!("Picture unavailable: {reason}"));
                }
            }
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(&card.display_name)
                    .size(18.0)
                    .strong()
                    .color(ACCENT),
            );
            ui.label(egui::RichText::new(&card.email).weak());
            if let Some(location) = &card.location {
                ui.small(location);
            }
        });

    let mut copy_email = false;
    frame
        .response
        .interact(egui::Sense::click())
        .context_menu(|ui| {
            if ui.button("Copy email").clicked() {
                copy_email = true;
                ui.close();
            }
        });
    copy_email
}

/// Draws a trigger as a button. Returns `true` when clicked while enabled.
pub fn trigger_button(ui: &mut egui::Ui, trigger: &TriggerView) -> bool {
    let text = egui::RichText::new(trigger.label).strong().size(16.0);
    let button = egui::Button::new(text).min_size(egui::vec2(160.0, 40.0));
    let response = ui.add_enabled(trigger.enabled, button);
    if trigger.busy {
        ui.spinner();
    }
    response.clicked()
}
