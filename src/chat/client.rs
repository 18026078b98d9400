//! HTTP client for the Manu backend
//!
//! Two endpoints: `POST /generate-response` returns the assistant text
//! plus an optional audio path, and a plain GET of that path returns the
//! synthesized speech bytes.

use crate::chat::config::ChatConfig;
use crate::{CharlaError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub robot_id: String,
    pub history: Vec<String>,
    pub voice_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
    /// Path relative to the backend origin, e.g. "/audio/1.mp3"
    #[serde(default)]
    pub audio_url: Option<String>,
}

pub struct BackendClient {
    client: Client,
    base_url: String,
    robot_id: String,
}

impl BackendClient {
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CharlaError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            robot_id: config.robot_id.clone(),
        })
    }

    /// Request the assistant's reply for the given flattened history
    pub async fn generate_response(
        &self,
        history: Vec<String>,
        voice_id: &str,
    ) -> Result<GenerateResponse> {
        let url = format!("{}/generate-response", self.base_url);

        let request = GenerateRequest {
            robot_id: self.robot_id.clone(),
            history,
            voice_id: voice_id.to_string(),
        };

        let response = self.client.post(&url).json(&request).send().await?;

        // Any non-success status is a hard failure for this turn
        if !response.status().is_success() {
            return Err(CharlaError::BackendError(format!(
                "generate-response failed with status {}",
                response.status()
            )));
        }

        let generated: GenerateResponse = response.json().await?;
        Ok(generated)
    }

    /// Fetch the synthesized speech for a reply; `audio_url` is relative
    /// to the backend origin
    pub async fn fetch_audio(&self, audio_url: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, audio_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CharlaError::BackendError(format!(
                "audio fetch failed with status {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
