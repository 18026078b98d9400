//! Static catalog of speech-synthesis voices
//!
//! Each key maps to a UI display name and the backend voice identifier
//! sent with generation requests. Changing the selection takes effect on
//! the next submitted message.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceKey {
    MasculinaProfesional,
    FemeninaSuave,
}

impl VoiceKey {
    /// All selectable voices, in UI order
    pub const ALL: [VoiceKey; 2] = [VoiceKey::MasculinaProfesional, VoiceKey::FemeninaSuave];

    /// Name shown in the voice selector
    pub fn display_name(&self) -> &'static str {
        match self {
            VoiceKey::MasculinaProfesional => "Masculina",
            VoiceKey::FemeninaSuave => "Femenina",
        }
    }

    /// Backend voice identifier for the generation request
    pub fn voice_id(&self) -> &'static str {
        match self {
            VoiceKey::MasculinaProfesional => "gBTPbHzRd0ZmV75Z5Zk4",
            VoiceKey::FemeninaSuave => "9rvdnhrYoXoUt4igKpBw",
        }
    }
}

impl Default for VoiceKey {
    fn default() -> Self {
        VoiceKey::MasculinaProfesional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete() {
        assert_eq!(VoiceKey::ALL.len(), 2);
        for key in VoiceKey::ALL {
            assert!(!key.display_name().is_empty());
            assert!(!key.voice_id().is_empty());
        }
    }

    #[test]
    fn test_voice_ids_are_distinct() {
        assert_ne!(
            VoiceKey::MasculinaProfesional.voice_id(),
            VoiceKey::FemeninaSuave.voice_id()
        );
    }

    #[test]
    fn test_default_voice() {
        assert_eq!(VoiceKey::default(), VoiceKey::MasculinaProfesional);
    }
}
