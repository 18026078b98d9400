//! Message list component
//!
//! Displays the conversation with user/assistant bubbles, timestamps,
//! and a typing indicator while a response is being generated.

use crate::messages::Message;
use crate::ui::state::{AppState, TurnPhase};
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText};

/// Message list component
pub struct MessageList<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let messages = self.state.messages.get_all();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    for message in &messages {
                        self.show_message(ui, message);
                        ui.add_space(self.theme.spacing_sm);
                    }

                    if self.state.phase == TurnPhase::AwaitingText {
                        self.show_typing_indicator(ui);
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message) {
        let is_user = message.is_user();
        let bubble_color = if is_user {
            self.theme.user_bubble
        } else {
            self.theme.assistant_bubble
        };

        let text_color = if is_user {
            Color32::WHITE
        } else {
            self.theme.text_primary
        };

        // Align messages based on sender
        let align = if is_user { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            // Sender label
            ui.label(
                RichText::new(if is_user { "Tú" } else { "Manu" })
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            // Message bubble
            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.label(RichText::new(&message.text).color(text_color));
                });

            // Timestamp, plus the active voice on assistant messages
            let time_str = message.timestamp.format("%H:%M").to_string();
            if is_user {
                ui.label(
                    RichText::new(time_str)
                        .size(10.0)
                        .color(self.theme.text_muted),
                );
            } else {
                ui.label(
                    RichText::new(format!(
                        "{} · {}",
                        time_str,
                        self.state.selected_voice.display_name()
                    ))
                    .size(10.0)
                    .color(self.theme.text_muted),
                );
            }
        });
    }

    fn show_typing_indicator(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(Align::LEFT), |ui| {
            ui.label(
                RichText::new("Manu")
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            egui::Frame::none()
                .fill(self.theme.assistant_bubble)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for i in 0..3 {
                            let t = ui.ctx().input(|input| input.time);
                            let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                            ui.label(
                                RichText::new("●")
                                    .size(10.0)
                                    .color(self.theme.text_muted.gamma_multiply(alpha)),
                            );
                        }

                        ui.label(
                            RichText::new("Manu está generando una respuesta...")
                                .size(12.0)
                                .color(self.theme.text_muted),
                        );
                    });
                });
        });

        // Request repaint for the animation
        ui.ctx().request_repaint();
    }
}
