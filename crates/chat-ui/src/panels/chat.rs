//! Chat panel — conversation transcript and input field.

use egui::{self, Align, Color32, Layout, RichText, ScrollArea, Vec2};

use chat_core::conversation::Conversation;
use chat_types::message::{Message, Role};
use crate::state::UiState;
use crate::theme::*;

/// Render the chat panel. Returns Some(prompt) when the user submits
/// input; the caller dispatches it through the orchestrator, which is
/// what appends the message to the transcript.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    conversation: &Conversation,
) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Chat").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if conversation.is_busy() {
                            WARNING
                        } else if conversation.error.is_some() {
                            ERROR
                        } else {
                            SUCCESS
                        };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                // Error banner
                if let Some(error) = &conversation.error {
                    egui::Frame::default()
                        .fill(Color32::from_rgb(50, 20, 20))
                        .corner_radius(PANEL_ROUNDING)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(error).color(ERROR).small());
                        });
                    ui.add_space(4.0);
                }

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        let last = conversation.messages.len().saturating_sub(1);
                        for (i, message) in conversation.messages.iter().enumerate() {
                            let streaming = conversation.is_streaming && i == last;
                            render_message(ui, message, streaming);
                            ui.add_space(4.0);
                        }

                        if conversation.is_loading && !conversation.is_streaming {
                            ui.label(
                                RichText::new("Waiting for response...")
                                    .color(TEXT_SECONDARY)
                                    .italics()
                                    .small(),
                            );
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Ask for some code...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled =
                        !state.input_text.trim().is_empty() && !conversation.is_busy();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    if (response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        && send_enabled)
                        || send_btn.clicked()
                    {
                        let text = state.input_text.trim().to_string();
                        submitted = Some(text);
                        state.input_text.clear();
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, message: &Message, streaming: bool) {
    let error_bg = Color32::from_rgb(50, 20, 20);
    let (label, label_color, bg) = if message.is_error {
        ("Error", ERROR, error_bg)
    } else {
        match message.role {
            Role::User => ("You", ACCENT, BG_SECONDARY),
            Role::Assistant => ("Assistant", SUCCESS, BG_SECONDARY),
        }
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(label).color(label_color).strong().small());
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
                if streaming {
                    ui.label(RichText::new("▌").color(ACCENT).strong());
                }
            });
        });
}
