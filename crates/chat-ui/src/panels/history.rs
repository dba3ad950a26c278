//! History panel — archived sessions, newest first.

use egui::{self, RichText, ScrollArea};

use chat_types::session::ChatHistory;
use crate::theme::*;

/// What the caller should do after rendering the history panel
pub enum HistoryAction {
    /// Nothing to do
    None,
    /// Archive the current conversation and start fresh
    NewChat,
    /// Restore the archived session at this index
    Load(usize),
}

/// Render the session history panel.
pub fn history_panel(ui: &mut egui::Ui, history: &ChatHistory) -> HistoryAction {
    let mut action = HistoryAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("History").color(TEXT_PRIMARY).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(RichText::new("New Chat").color(TEXT_PRIMARY))
                        .clicked()
                    {
                        action = HistoryAction::NewChat;
                    }
                });
            });

            ui.separator();

            if history.is_empty() {
                ui.label(
                    RichText::new("No past sessions")
                        .color(TEXT_SECONDARY)
                        .italics()
                        .small(),
                );
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (index, session) in history.iter().enumerate() {
                        let response = ui.add(
                            egui::Button::new(
                                RichText::new(&session.title).color(TEXT_PRIMARY).small(),
                            )
                            .fill(BG_SURFACE)
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(egui::Vec2::new(ui.available_width(), 0.0)),
                        );
                        if response.clicked() {
                            action = HistoryAction::Load(index);
                        }
                        // Archive date, dropping the sub-day precision.
                        let date = session.timestamp.split('T').next().unwrap_or("");
                        ui.label(RichText::new(date).color(TEXT_SECONDARY).small());
                        ui.add_space(4.0);
                    }
                });
        });

    action
}
