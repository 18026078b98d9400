//! Main application struct and eframe integration
//!
//! This module contains the main CharlaApp that implements eframe::App.

use crate::audio::AudioPlayback;
use crate::chat::pipeline::{ChatCommand, ChatEvent};
use crate::chat::{ChatConfig, VoiceKey};
use crate::ui::components::{InputBar, MessageList};
use crate::ui::state::{AppState, TurnPhase};
use crate::ui::theme::Theme;
use crossbeam_channel::{Receiver, Sender};
use egui::{self, CentralPanel, RichText, TopBottomPanel};
use tracing::warn;

/// Main Charla application
pub struct CharlaApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
}

impl CharlaApp {
    /// Create a new Charla application wired to the chat pipeline
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &ChatConfig,
        command_tx: Sender<ChatCommand>,
        event_rx: Receiver<ChatEvent>,
    ) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let mut state = AppState::new(config);
        state.chat_command_tx = Some(command_tx);
        state.chat_event_rx = Some(event_rx);

        // Without an output device the app still runs text-only
        state.playback = match AudioPlayback::new() {
            Ok(playback) => Some(playback),
            Err(e) => {
                warn!("Audio playback unavailable: {}", e);
                None
            }
        };

        Self { state, theme }
    }

    /// Re-apply the theme when the mode flag changed
    fn sync_theme(&mut self, ctx: &egui::Context) {
        if self.theme.is_dark != self.state.dark_mode {
            self.theme = Theme::for_mode(self.state.dark_mode);
            self.theme.apply(ctx);
        }
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // App title
                    ui.label(
                        RichText::new("Manu")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("IA • LuminaLab")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // Theme toggle
                        let (icon, label) = if self.state.dark_mode {
                            ("☀", "Día")
                        } else {
                            ("🌙", "Noche")
                        };
                        if ui
                            .button(format!("{} {}", icon, label))
                            .on_hover_text("Cambiar tema")
                            .clicked()
                        {
                            self.state.toggle_theme();
                        }

                        // Voice selector; applies to the next submission
                        let mut selected = self.state.selected_voice;
                        egui::ComboBox::from_id_salt("voice_selector")
                            .selected_text(selected.display_name())
                            .show_ui(ui, |ui| {
                                for voice in VoiceKey::ALL {
                                    ui.selectable_value(
                                        &mut selected,
                                        voice,
                                        voice.display_name(),
                                    );
                                }
                            });
                        if selected != self.state.selected_voice {
                            self.state.select_voice(selected);
                        }

                        ui.label(RichText::new("🔊").size(14.0).color(self.theme.text_muted));

                        // Stop button, only while audio plays
                        if self.state.phase == TurnPhase::Playing {
                            if ui
                                .button(RichText::new("⏹").color(self.theme.error))
                                .on_hover_text("Detener audio")
                                .clicked()
                            {
                                self.state.stop_audio();
                            }
                        }
                    });
                });
            });
    }

    /// Show the bottom input area
    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    InputBar::new(&mut self.state, &self.theme).show(ui);

                    ui.label(
                        RichText::new("Manu utiliza IA. Verifica información importante.")
                            .size(11.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }

    /// Show the main content area (message list)
    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                MessageList::new(&self.state, &self.theme).show(ui);
            });
    }
}

impl eframe::App for CharlaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll backend events and playback completion
        self.state.poll_events();

        self.sync_theme(ctx);

        // Render UI
        self.show_header(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        // Keep polling while a turn is in flight or audio plays
        if self.state.is_busy() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.stop_audio();
        if let Some(tx) = &self.state.chat_command_tx {
            let _ = tx.send(ChatCommand::Shutdown);
        }
    }
}
