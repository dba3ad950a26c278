//! Code workspace panel — the generated code with edit and preview
//! tabs. Edits live only in UI state; the next completed cycle that
//! yields a primary block replaces them.

use egui::{self, RichText, ScrollArea, Vec2};

use crate::state::{CodeTab, UiState};
use crate::theme::*;

/// What the caller should do after rendering the code panel
pub enum CodeAction {
    /// Nothing to do
    None,
    /// Save the edited code as a file download
    Download,
}

/// Render the code workspace panel.
pub fn code_panel(ui: &mut egui::Ui, state: &mut UiState) -> CodeAction {
    let mut action = CodeAction::None;

    egui::Frame::default()
        .fill(CODE_BG)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            // Header: title, language badge, actions
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Generated Code")
                        .color(CODE_FG)
                        .strong()
                        .monospace(),
                );
                ui.label(
                    RichText::new(&state.code_language)
                        .color(ACCENT)
                        .small()
                        .monospace(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .small_button(RichText::new("Close").color(TEXT_SECONDARY))
                        .clicked()
                    {
                        state.show_code_panel = false;
                    }
                    let has_code = !state.edited_code.is_empty();
                    if ui
                        .add_enabled(
                            has_code,
                            egui::Button::new(
                                RichText::new("Download").color(TEXT_PRIMARY).small(),
                            )
                            .corner_radius(PANEL_ROUNDING),
                        )
                        .clicked()
                    {
                        action = CodeAction::Download;
                    }
                    if ui
                        .add_enabled(
                            has_code,
                            egui::Button::new(RichText::new("Copy").color(TEXT_PRIMARY).small())
                                .corner_radius(PANEL_ROUNDING),
                        )
                        .clicked()
                    {
                        ui.ctx().copy_text(state.edited_code.clone());
                    }
                });
            });

            ui.separator();

            // Tab strip
            ui.horizontal(|ui| {
                for (tab, label) in [(CodeTab::Edit, "Edit"), (CodeTab::Preview, "Preview")] {
                    let selected = state.code_tab == tab;
                    if ui
                        .selectable_label(selected, RichText::new(label).monospace())
                        .clicked()
                    {
                        state.code_tab = tab;
                    }
                }
            });

            ui.add_space(4.0);

            match state.code_tab {
                CodeTab::Edit => {
                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            ui.add_sized(
                                Vec2::new(ui.available_width(), ui.available_height()),
                                egui::TextEdit::multiline(&mut state.edited_code)
                                    .font(egui::FontId::monospace(13.0))
                                    .text_color(CODE_FG)
                                    .code_editor(),
                            );
                        });
                }
                CodeTab::Preview => {
                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            render_preview(ui, &state.code_language, &state.edited_code);
                        });
                }
            }
        });

    action
}

/// Read-only rendering of the workspace content. Pure: same inputs,
/// same widgets.
fn render_preview(ui: &mut egui::Ui, language: &str, code: &str) {
    if code.is_empty() {
        ui.label(
            RichText::new("No code generated yet")
                .color(TEXT_SECONDARY)
                .italics(),
        );
        return;
    }

    ui.label(
        RichText::new(format!("── {} ──", language))
            .color(TEXT_SECONDARY)
            .small()
            .monospace(),
    );
    for line in code.lines() {
        ui.label(RichText::new(line).color(CODE_FG).monospace());
    }
}
