//! Conversation core: backend configuration, voice catalog, transcript
//! log, HTTP client, and the request/response pipeline worker.

pub mod client;
pub mod config;
pub mod pipeline;
pub mod transcript;
pub mod voice;

pub use client::{BackendClient, GenerateResponse};
pub use config::{ChatConfig, FALLBACK_REPLY};
pub use pipeline::{ChatCommand, ChatEvent, ChatPipeline};
pub use transcript::Transcript;
pub use voice::VoiceKey;
