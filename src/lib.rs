pub mod audio;
pub mod chat;
pub mod messages;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CharlaError {
    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Audio decode error: {0}")]
    AudioDecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<reqwest::Error> for CharlaError {
    fn from(e: reqwest::Error) -> Self {
        CharlaError::BackendError(e.to_string())
    }
}

impl CharlaError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The next turn may succeed; the conversation continues
            CharlaError::BackendError(_) => true,
            // Hardware/device errors may require user intervention
            CharlaError::AudioDeviceError(_) => false,
            // A bad payload only affects this turn's playback
            CharlaError::AudioDecodeError(_) => true,
            CharlaError::ConfigError(_) => false,
            CharlaError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            CharlaError::BackendError(_) => crate::chat::FALLBACK_REPLY.to_string(),
            CharlaError::AudioDeviceError(_) => {
                "No se pudo acceder al dispositivo de audio. La respuesta se muestra como texto."
                    .to_string()
            }
            CharlaError::AudioDecodeError(_) => {
                "No se pudo reproducir el audio. La respuesta se muestra como texto.".to_string()
            }
            CharlaError::ConfigError(_) => {
                "Error de configuración. Revisa los ajustes.".to_string()
            }
            CharlaError::ChannelError(_) => {
                "Error interno de comunicación. Reinicia la aplicación.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CharlaError>;
