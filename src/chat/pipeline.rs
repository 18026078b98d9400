//! Chat pipeline for executing the per-turn request sequence
//!
//! Provides a channel-based worker that runs the two backend calls
//! (text generation, then the optional audio fetch) off the UI thread.
//! Every turn carries a request id; the UI drops events from abandoned
//! turns, so a late response can never corrupt a newer one.

use crate::chat::client::BackendClient;
use crate::chat::config::ChatConfig;
use crate::{CharlaError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Commands that can be sent to the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Run one conversation turn against the backend
    Generate {
        /// Flattened transcript including the user's new "Usuario:" line
        history: Vec<String>,
        /// Backend voice identifier for speech synthesis
        voice_id: String,
        /// Unique request ID for tracking
        request_id: Uuid,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// The assistant's reply text arrived
    Response {
        /// Reply text to render and commit to the transcript
        text: String,
        /// Whether an audio fetch for this turn will follow
        audio_pending: bool,
        /// Request ID this reply belongs to
        request_id: Uuid,
    },

    /// Text generation failed; the turn ends with the fallback reply
    ResponseFailed {
        error: String,
        request_id: Uuid,
    },

    /// Synthesized speech bytes for the reply are ready for playback
    Audio {
        bytes: Vec<u8>,
        request_id: Uuid,
    },

    /// The audio fetch failed; non-fatal, the text reply stands
    AudioFailed {
        error: String,
        request_id: Uuid,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Chat pipeline with channel-based communication
pub struct ChatPipeline {
    /// Configuration
    config: ChatConfig,

    /// Command sender
    command_tx: Sender<ChatCommand>,

    /// Command receiver (for worker)
    command_rx: Receiver<ChatCommand>,

    /// Event sender (for worker)
    event_tx: Sender<ChatEvent>,

    /// Event receiver
    event_rx: Receiver<ChatEvent>,
}

impl ChatPipeline {
    /// Create a new chat pipeline
    pub fn new(config: ChatConfig) -> Self {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<ChatCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<ChatEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread
    ///
    /// This spawns a new thread that executes backend turns sequentially.
    pub fn start_worker(self) -> Result<()> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Chat pipeline worker starting");

            // Create tokio runtime for the HTTP calls
            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(ChatEvent::Shutdown);
                    return;
                }
            };

            let client = match BackendClient::new(&config) {
                Ok(client) => client,
                Err(e) => {
                    error!("Failed to create backend client: {}", e);
                    let _ = event_tx.send(ChatEvent::Shutdown);
                    return;
                }
            };

            info!("Chat pipeline worker ready");

            // Process commands
            loop {
                match command_rx.recv() {
                    Ok(ChatCommand::Generate {
                        history,
                        voice_id,
                        request_id,
                    }) => {
                        debug!("Processing turn {}: {} history entries", request_id, history.len());

                        let result = runtime
                            .block_on(client.generate_response(history, &voice_id));

                        let response = match result {
                            Ok(response) => response,
                            Err(e) => {
                                error!("Text generation failed: {}", e);
                                let _ = event_tx.send(ChatEvent::ResponseFailed {
                                    error: e.to_string(),
                                    request_id,
                                });
                                continue;
                            }
                        };

                        debug!(
                            "Turn {} answered: {} chars, audio: {}",
                            request_id,
                            response.text.len(),
                            response.audio_url.is_some()
                        );

                        let _ = event_tx.send(ChatEvent::Response {
                            text: response.text,
                            audio_pending: response.audio_url.is_some(),
                            request_id,
                        });

                        // Follow-up audio fetch; failure leaves the text reply intact
                        if let Some(audio_url) = response.audio_url {
                            match runtime.block_on(client.fetch_audio(&audio_url)) {
                                Ok(bytes) => {
                                    debug!("Fetched {} audio bytes for turn {}", bytes.len(), request_id);
                                    let _ = event_tx.send(ChatEvent::Audio { bytes, request_id });
                                }
                                Err(e) => {
                                    warn!("Audio fetch failed for turn {}: {}", request_id, e);
                                    let _ = event_tx.send(ChatEvent::AudioFailed {
                                        error: e.to_string(),
                                        request_id,
                                    });
                                }
                            }
                        }
                    }

                    Ok(ChatCommand::Shutdown) => {
                        info!("Chat pipeline worker shutting down");
                        let _ = event_tx.send(ChatEvent::Shutdown);
                        break;
                    }

                    Err(e) => {
                        error!("Command channel error: {}", e);
                        break;
                    }
                }
            }

            info!("Chat pipeline worker stopped");
        });

        Ok(())
    }
}

/// Send a command, mapping channel failure into the crate error type
pub fn send_command(tx: &Sender<ChatCommand>, cmd: ChatCommand) -> Result<()> {
    tx.send(cmd)
        .map_err(|e| CharlaError::ChannelError(format!("Failed to send command: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_creation() {
        let config = ChatConfig::default();
        let pipeline = ChatPipeline::new(config);

        // Verify channels are created
        let _cmd_tx = pipeline.command_sender();
        let _event_rx = pipeline.event_receiver();
    }

    #[test]
    fn test_command_variants() {
        let cmd = ChatCommand::Generate {
            history: vec!["Usuario: hola".to_string()],
            voice_id: "voz".to_string(),
            request_id: Uuid::new_v4(),
        };

        match cmd {
            ChatCommand::Generate { history, .. } => {
                assert_eq!(history.len(), 1);
            }
            _ => panic!("Wrong variant"),
        }

        match ChatCommand::Shutdown {
            ChatCommand::Shutdown => {}
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_event_variants() {
        let request_id = Uuid::new_v4();

        let _response = ChatEvent::Response {
            text: "La IA es...".to_string(),
            audio_pending: true,
            request_id,
        };

        let _failed = ChatEvent::ResponseFailed {
            error: "status 500".to_string(),
            request_id,
        };

        let _audio = ChatEvent::Audio {
            bytes: vec![0u8; 4],
            request_id,
        };

        let _audio_failed = ChatEvent::AudioFailed {
            error: "status 404".to_string(),
            request_id,
        };

        let _shutdown = ChatEvent::Shutdown;
    }

    #[test]
    fn test_send_command_helper() {
        let (tx, rx) = bounded(1);
        send_command(&tx, ChatCommand::Shutdown).unwrap();
        assert!(matches!(rx.recv().unwrap(), ChatCommand::Shutdown));
    }
}
