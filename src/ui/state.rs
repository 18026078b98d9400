//! Application state management
//!
//! This module owns the conversation orchestration: the message list,
//! the transcript log, the per-turn phase machine, and the channel
//! endpoints of the chat pipeline.

use crate::audio::AudioPlayback;
use crate::chat::pipeline::{ChatCommand, ChatEvent};
use crate::chat::{ChatConfig, Transcript, VoiceKey, FALLBACK_REPLY};
use crate::messages::{Message, MessageStorage};
use crossbeam_channel::{Receiver, Sender as ChannelSender};
use tracing::{debug, warn};
use uuid::Uuid;

/// Phase of the current conversation turn
///
/// Replaces the loading/playing boolean pair with a single tagged state,
/// so "loading while playing" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No turn in flight; input is accepted
    Idle,
    /// Waiting for the text-generation response
    AwaitingText,
    /// Text rendered; waiting for the follow-up audio fetch
    AwaitingAudio,
    /// Audio playing; input stays blocked until it ends or is stopped
    Playing,
}

/// Central application state
pub struct AppState {
    /// Message storage (thread-safe)
    pub messages: MessageStorage,

    /// Current text input
    pub input_text: String,

    /// Phase of the turn in flight
    pub phase: TurnPhase,

    /// Voice used for the next submission
    pub selected_voice: VoiceKey,

    /// Dark or light theme
    pub dark_mode: bool,

    /// Flattened history sent to the backend
    pub transcript: Transcript,

    /// Channel to send chat commands
    pub chat_command_tx: Option<ChannelSender<ChatCommand>>,

    /// Channel to receive chat events
    pub chat_event_rx: Option<Receiver<ChatEvent>>,

    /// Playback handle; None when no output device is available
    pub playback: Option<AudioPlayback>,

    /// Last error message
    pub last_error: Option<String>,

    /// Id of the turn in flight; events with any other id are stale
    active_request: Option<Uuid>,

    /// User line held back until the backend answers, so the transcript
    /// only ever grows in request/response pairs
    pending_user_text: Option<String>,
}

impl AppState {
    /// Create the state seeded with the assistant's greeting
    pub fn new(config: &ChatConfig) -> Self {
        let messages = MessageStorage::new();
        messages.add(Message::assistant(config.greeting.clone()));

        Self {
            messages,
            input_text: String::new(),
            phase: TurnPhase::Idle,
            selected_voice: VoiceKey::default(),
            dark_mode: true,
            transcript: Transcript::new(&config.greeting),
            chat_command_tx: None,
            chat_event_rx: None,
            playback: None,
            last_error: None,
            active_request: None,
            pending_user_text: None,
        }
    }

    /// Whether a turn is in flight or audio is playing
    pub fn is_busy(&self) -> bool {
        self.phase != TurnPhase::Idle
    }

    /// Submit the current input as a new conversation turn
    ///
    /// No-op when the trimmed input is empty or a turn is in flight.
    /// Submission is blocked, not queued, while audio plays; the user
    /// stops playback (or lets it finish) first.
    pub fn submit(&mut self) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return;
        }
        if self.phase != TurnPhase::Idle {
            debug!("Submission rejected, phase {:?}", self.phase);
            return;
        }

        // Exclusivity: no prior session may outlive a new turn
        self.stop_audio();

        self.messages.add(Message::user(text.clone()));
        self.input_text.clear();

        let Some(tx) = &self.chat_command_tx else {
            warn!("No chat pipeline attached, dropping submission");
            return;
        };

        let history = self.transcript.with_user(&text);
        let request_id = Uuid::new_v4();

        let command = ChatCommand::Generate {
            history,
            voice_id: self.selected_voice.voice_id().to_string(),
            request_id,
        };

        if tx.send(command).is_err() {
            warn!("Chat pipeline unavailable");
            self.messages.add(Message::assistant(FALLBACK_REPLY));
            return;
        }

        self.pending_user_text = Some(text);
        self.active_request = Some(request_id);
        self.phase = TurnPhase::AwaitingText;
    }

    /// Stop playback; idempotent, safe when nothing is playing
    pub fn stop_audio(&mut self) {
        if let Some(playback) = &mut self.playback {
            playback.stop();
        }
        if self.phase == TurnPhase::Playing {
            self.finish_turn();
        }
    }

    /// Select the voice used for subsequent submissions
    pub fn select_voice(&mut self, voice: VoiceKey) {
        self.selected_voice = voice;
    }

    /// Flip between dark and light theme
    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Process incoming events from the chat pipeline and observe
    /// playback completion
    pub fn poll_events(&mut self) {
        let events: Vec<ChatEvent> = if let Some(rx) = &self.chat_event_rx {
            rx.try_iter().collect()
        } else {
            Vec::new()
        };

        for event in events {
            self.handle_event(event);
        }

        // The sink drains on its own; fold that back into the phase
        if self.phase == TurnPhase::Playing {
            let still_playing = self
                .playback
                .as_ref()
                .map(|p| p.is_playing())
                .unwrap_or(false);
            if !still_playing {
                self.finish_turn();
            }
        }
    }

    fn handle_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Response {
                text,
                audio_pending,
                request_id,
            } => {
                if !self.is_active(request_id) {
                    debug!("Dropping stale response for turn {}", request_id);
                    return;
                }

                self.messages.add(Message::assistant(text.clone()));

                // Commit the turn as a pair now that the backend answered
                if let Some(user_text) = self.pending_user_text.take() {
                    self.transcript.record_turn(&user_text, &text);
                }

                if audio_pending {
                    self.phase = TurnPhase::AwaitingAudio;
                } else {
                    self.finish_turn();
                }
            }

            ChatEvent::ResponseFailed { error, request_id } => {
                if !self.is_active(request_id) {
                    debug!("Dropping stale failure for turn {}", request_id);
                    return;
                }

                warn!("Turn {} failed: {}", request_id, error);
                self.last_error = Some(error);

                // The held-back user line is discarded with the turn
                self.pending_user_text = None;
                self.messages.add(Message::assistant(FALLBACK_REPLY));
                self.finish_turn();
            }

            ChatEvent::Audio { bytes, request_id } => {
                if !self.is_active(request_id) {
                    debug!("Dropping stale audio for turn {}", request_id);
                    return;
                }

                match &mut self.playback {
                    Some(playback) => match playback.play(bytes) {
                        Ok(()) => {
                            self.phase = TurnPhase::Playing;
                        }
                        Err(e) => {
                            // Non-fatal: the text reply stays on screen
                            warn!("Playback failed: {}", e);
                            self.finish_turn();
                        }
                    },
                    None => {
                        warn!("No audio device, skipping playback");
                        self.finish_turn();
                    }
                }
            }

            ChatEvent::AudioFailed { error, request_id } => {
                if !self.is_active(request_id) {
                    return;
                }
                // Already warn-logged by the pipeline; the turn degrades
                // to text-only
                debug!("Audio unavailable for turn {}: {}", request_id, error);
                self.finish_turn();
            }

            ChatEvent::Shutdown => {
                debug!("Chat pipeline shut down");
            }
        }
    }

    fn is_active(&self, request_id: Uuid) -> bool {
        self.active_request == Some(request_id)
    }

    fn finish_turn(&mut self) {
        self.phase = TurnPhase::Idle;
        self.active_request = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Sender;
    use crossbeam_channel::{bounded, Receiver as CbReceiver, Sender as CbSender};

    fn wired_state() -> (AppState, CbReceiver<ChatCommand>, CbSender<ChatEvent>) {
        let config = ChatConfig::default();
        let mut state = AppState::new(&config);

        let (command_tx, command_rx) = bounded(10);
        let (event_tx, event_rx) = bounded(10);
        state.chat_command_tx = Some(command_tx);
        state.chat_event_rx = Some(event_rx);

        (state, command_rx, event_tx)
    }

    fn active_request_id(command_rx: &CbReceiver<ChatCommand>) -> (Vec<String>, String, Uuid) {
        match command_rx.try_recv().expect("expected a Generate command") {
            ChatCommand::Generate {
                history,
                voice_id,
                request_id,
            } => (history, voice_id, request_id),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_greeting_seeds_state() {
        let (state, _rx, _tx) = wired_state();
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages.last().unwrap().sender, Sender::Assistant);
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.phase, TurnPhase::Idle);
    }

    #[test]
    fn test_empty_submission_is_noop() {
        let (mut state, command_rx, _tx) = wired_state();

        state.input_text = "   ".to_string();
        state.submit();

        assert!(command_rx.try_recv().is_err());
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.phase, TurnPhase::Idle);
    }

    #[test]
    fn test_submission_blocked_while_awaiting_text() {
        let (mut state, command_rx, _tx) = wired_state();

        state.input_text = "primera".to_string();
        state.submit();
        let _ = active_request_id(&command_rx);

        state.input_text = "segunda".to_string();
        state.submit();

        // No duplicate request, no duplicate message
        assert!(command_rx.try_recv().is_err());
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.input_text, "segunda");
    }

    #[test]
    fn test_submission_blocked_while_playing() {
        let (mut state, command_rx, _tx) = wired_state();
        state.phase = TurnPhase::Playing;

        state.input_text = "hola".to_string();
        state.submit();

        assert!(command_rx.try_recv().is_err());
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_successful_turn() {
        let (mut state, command_rx, event_tx) = wired_state();

        state.input_text = "¿Qué es la IA?".to_string();
        state.submit();
        assert_eq!(state.phase, TurnPhase::AwaitingText);

        let (history, voice_id, request_id) = active_request_id(&command_rx);
        assert_eq!(history.last().unwrap(), "Usuario: ¿Qué es la IA?");
        assert_eq!(voice_id, VoiceKey::MasculinaProfesional.voice_id());
        // Outgoing history is the committed log plus the new user line
        assert_eq!(history.len(), state.transcript.len() + 1);

        event_tx
            .send(ChatEvent::Response {
                text: "La IA es...".to_string(),
                audio_pending: true,
                request_id,
            })
            .unwrap();
        state.poll_events();

        // greeting + user + assistant
        assert_eq!(state.messages.len(), 3);
        assert_eq!(state.messages.last().unwrap().text, "La IA es...");
        assert_eq!(state.transcript.len(), 3);
        assert_eq!(state.transcript.entries()[1], "Usuario: ¿Qué es la IA?");
        assert_eq!(state.transcript.entries()[2], "Manu: La IA es...");
        assert_eq!(state.phase, TurnPhase::AwaitingAudio);

        // Audio fetch failure degrades the turn to text-only
        event_tx
            .send(ChatEvent::AudioFailed {
                error: "status 404".to_string(),
                request_id,
            })
            .unwrap();
        state.poll_events();
        assert_eq!(state.phase, TurnPhase::Idle);
        assert_eq!(state.messages.len(), 3);
    }

    #[test]
    fn test_turn_without_audio_returns_to_idle() {
        let (mut state, command_rx, event_tx) = wired_state();

        state.input_text = "hola".to_string();
        state.submit();
        let (_, _, request_id) = active_request_id(&command_rx);

        event_tx
            .send(ChatEvent::Response {
                text: "¡Hola!".to_string(),
                audio_pending: false,
                request_id,
            })
            .unwrap();
        state.poll_events();

        assert_eq!(state.phase, TurnPhase::Idle);
        assert_eq!(state.messages.len(), 3);
    }

    #[test]
    fn test_failed_turn_appends_fallback_and_keeps_transcript() {
        let (mut state, command_rx, event_tx) = wired_state();

        state.input_text = "hola".to_string();
        state.submit();
        let (_, _, request_id) = active_request_id(&command_rx);
        let transcript_before = state.transcript.len();

        event_tx
            .send(ChatEvent::ResponseFailed {
                error: "status 500".to_string(),
                request_id,
            })
            .unwrap();
        state.poll_events();

        // user message + exactly one fallback assistant message
        assert_eq!(state.messages.len(), 3);
        assert_eq!(state.messages.last().unwrap().text, FALLBACK_REPLY);
        // neither the "Usuario:" nor a "Manu:" entry was recorded
        assert_eq!(state.transcript.len(), transcript_before);
        assert_eq!(state.phase, TurnPhase::Idle);
        assert!(state.last_error.is_some());
    }

    #[test]
    fn test_stale_events_are_dropped() {
        let (mut state, command_rx, event_tx) = wired_state();

        state.input_text = "hola".to_string();
        state.submit();
        let _ = active_request_id(&command_rx);

        event_tx
            .send(ChatEvent::Response {
                text: "respuesta vieja".to_string(),
                audio_pending: false,
                request_id: Uuid::new_v4(),
            })
            .unwrap();
        state.poll_events();

        // Still waiting on the real turn
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.phase, TurnPhase::AwaitingText);
    }

    #[test]
    fn test_audio_without_device_degrades_to_text() {
        let (mut state, command_rx, event_tx) = wired_state();

        state.input_text = "hola".to_string();
        state.submit();
        let (_, _, request_id) = active_request_id(&command_rx);

        event_tx
            .send(ChatEvent::Response {
                text: "¡Hola!".to_string(),
                audio_pending: true,
                request_id,
            })
            .unwrap();
        event_tx
            .send(ChatEvent::Audio {
                bytes: vec![0u8; 16],
                request_id,
            })
            .unwrap();
        state.poll_events();

        // playback is None here, so the turn ends with the text shown
        assert_eq!(state.phase, TurnPhase::Idle);
        assert_eq!(state.messages.last().unwrap().text, "¡Hola!");
    }

    #[test]
    fn test_stop_audio_is_idempotent() {
        let (mut state, _rx, _tx) = wired_state();
        state.stop_audio();
        state.stop_audio();
        assert_eq!(state.phase, TurnPhase::Idle);
    }

    #[test]
    fn test_voice_selection_applies_to_next_submission() {
        let (mut state, command_rx, _tx) = wired_state();

        state.select_voice(VoiceKey::FemeninaSuave);
        state.input_text = "hola".to_string();
        state.submit();

        let (_, voice_id, _) = active_request_id(&command_rx);
        assert_eq!(voice_id, VoiceKey::FemeninaSuave.voice_id());
    }

    #[test]
    fn test_theme_toggle() {
        let (mut state, _rx, _tx) = wired_state();
        assert!(state.dark_mode);
        state.toggle_theme();
        assert!(!state.dark_mode);
        state.toggle_theme();
        assert!(state.dark_mode);
    }
}
