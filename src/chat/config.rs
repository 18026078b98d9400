//! Configuration for the Manu backend connection
//!
//! All values are compiled-in defaults; setters exist for tests and
//! alternative deployments.

use std::time::Duration;

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "https://web-production-db25e.up.railway.app";

/// Robot identifier sent with every generation request
pub const DEFAULT_ROBOT_ID: &str = "77a2ca9f-b7b0-46cb-b732-3cf011b0a867";

/// Fixed assistant reply shown when text generation fails
pub const FALLBACK_REPLY: &str =
    "Lo siento, ha ocurrido un error. Por favor, intenta de nuevo.";

/// Assistant greeting that seeds both the message list and the transcript
pub const GREETING: &str = "¡Hola! Soy Manu, tu asistente de inteligencia artificial \
desarrollado por LuminaLab. Estoy aquí para ayudarte con cualquier pregunta o problema \
que tengas. Mi objetivo es brindarte respuestas precisas y útiles de manera clara y \
profesional. ¿En qué puedo asistirte hoy?";

/// Configuration for the chat backend
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// Backend origin, no trailing slash
    pub base_url: String,

    /// Robot identifier for the generation endpoint
    pub robot_id: String,

    /// Assistant greeting text
    pub greeting: String,

    /// Per-request deadline so a dead backend cannot hold a turn open forever
    pub request_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            robot_id: DEFAULT_ROBOT_ID.to_string(),
            greeting: GREETING.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ChatConfig {
    /// Set the backend origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the robot identifier
    pub fn with_robot_id(mut self, robot_id: impl Into<String>) -> Self {
        self.robot_id = robot_id.into();
        self
    }

    /// Set the per-request deadline
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url is required".to_string());
        }
        if self.base_url.ends_with('/') {
            return Err("base_url must not end with a slash".to_string());
        }
        if self.robot_id.is_empty() {
            return Err("robot_id is required".to_string());
        }
        Ok(())
    }
}
