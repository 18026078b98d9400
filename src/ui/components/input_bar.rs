//! Input bar component
//!
//! Provides the text input and send button. Both are disabled while a
//! turn is in flight or audio is playing, so submissions serialize.

use crate::ui::state::{AppState, TurnPhase};
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// Input bar component for composing messages
pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_text_input(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_send_button(ui);
                });
            });
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let busy = self.state.is_busy();

        // Use remaining width for the text input
        let available_width = ui.available_width() - 60.0; // Reserve space for send button

        let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
            .hint_text("Escribe tu pregunta aquí...")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0));

        let response = ui.add_enabled(!busy, text_edit);

        // Enter submits the current input
        if response.has_focus() && !self.state.input_text.trim().is_empty() {
            let enter_pressed = ui.input(|i| i.key_pressed(Key::Enter));
            let shift_held = ui.input(|i| i.modifiers.shift);

            if enter_pressed && !shift_held {
                self.state.submit();
            }
        }

        if !busy {
            response.request_focus();
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let can_send = !self.state.input_text.trim().is_empty() && !self.state.is_busy();

        let tooltip = match self.state.phase {
            TurnPhase::Idle => "Enviar mensaje (Enter)",
            TurnPhase::AwaitingText | TurnPhase::AwaitingAudio => "Generando respuesta...",
            TurnPhase::Playing => "Detén el audio para enviar",
        };

        let button_color = if can_send {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(RichText::new("➤").size(18.0).color(egui::Color32::WHITE))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding)
            .fill(button_color);

        let response = ui.add_enabled(can_send, button);

        if response.clicked() {
            self.state.submit();
        }

        response.on_hover_text(tooltip);
    }
}
