//! Chat panel — displays the transcript and the input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use chat_types::message::Message;
use crate::state::UiState;
use crate::theme::*;

/// Enter submits only without modifiers; Shift+Enter is a line break.
pub fn submit_on_enter(modifiers: egui::Modifiers) -> bool {
    modifiers.is_none()
}

/// Render the chat panel. Returns Some(message) when the user submits input.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new("AI Assistant")
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                let available_height = ui.available_height() - 80.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in state.transcript.iter() {
                            render_message(ui, entry);
                            ui.add_space(6.0);
                        }

                        if state.is_busy() {
                            egui::Frame::default()
                                .fill(BG_SECONDARY)
                                .corner_radius(PANEL_ROUNDING)
                                .inner_margin(10.0)
                                .show(ui, |ui| {
                                    ui.horizontal(|ui| {
                                        ui.add(egui::Spinner::new().color(ACCENT));
                                        ui.label(
                                            RichText::new(crate::state::STATUS_THINKING)
                                                .color(ACCENT)
                                                .strong(),
                                        );
                                    });
                                });
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input_id = ui.make_persistent_id("chat_input");
                    let had_focus = ui.memory(|m| m.has_focus(input_id));
                    let modifiers = ui.input(|i| i.modifiers);
                    // Consume Enter before the TextEdit sees it, otherwise it inserts a newline.
                    let enter_pressed = had_focus
                        && submit_on_enter(modifiers)
                        && ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));

                    let busy = state.is_busy();
                    let input = egui::TextEdit::multiline(&mut state.input_text)
                        .id(input_id)
                        .hint_text("Escribe tu consulta aquí... (Presiona Enter para enviar)")
                        .desired_rows(1)
                        .desired_width(ui.available_width() - 110.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add_enabled(!busy, input);

                    let send_enabled = state.can_send();
                    let label = if busy { "Enviando" } else { "Enviar" };
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new(label).color(TEXT_PRIMARY).strong())
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(100.0, 40.0)),
                    );

                    if enter_pressed || send_btn.clicked() {
                        submitted = state.submit();
                        if submitted.is_some() {
                            response.request_focus();
                        }
                    }
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, entry: &Message) {
    let (label, label_color, bg, text_color, align) = if entry.is_user() {
        ("Tú", TEXT_PRIMARY, BUBBLE_USER, TEXT_PRIMARY, Align::Max)
    } else {
        ("AI Assistant", ACCENT, BUBBLE_ASSISTANT, TEXT_ON_LIGHT, Align::Min)
    };

    ui.with_layout(Layout::top_down(align), |ui| {
        let max_width = ui.available_width() * 0.75;
        egui::Frame::default()
            .fill(bg)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(label).color(label_color).strong().small());
                    ui.label(
                        RichText::new(entry.display_time())
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                });
                ui.label(RichText::new(&entry.text).color(text_color));
            });
    });
}
