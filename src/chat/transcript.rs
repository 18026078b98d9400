//! Flattened conversation log sent to the backend
//!
//! Distinct from the structured message list rendered in the UI: each
//! entry is a "Role: content" line, roles are "Usuario" and "Manu".
//! Entries are only ever appended in request/response pairs, so a failed
//! turn leaves the log untouched.

/// Role label for user entries
pub const USER_LABEL: &str = "Usuario";

/// Role label for assistant entries
pub const ASSISTANT_LABEL: &str = "Manu";

#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<String>,
}

impl Transcript {
    /// Create a transcript seeded with the assistant's greeting
    pub fn new(greeting: &str) -> Self {
        Self {
            entries: vec![format!("{}: {}", ASSISTANT_LABEL, greeting)],
        }
    }

    /// Build the outgoing history for a submission: every committed entry
    /// plus the user's new line. Does not mutate the log; the pair is
    /// committed only once the backend answers.
    pub fn with_user(&self, user_text: &str) -> Vec<String> {
        let mut history = self.entries.clone();
        history.push(format!("{}: {}", USER_LABEL, user_text));
        history
    }

    /// Commit a completed turn as a "Usuario:"/"Manu:" pair
    pub fn record_turn(&mut self, user_text: &str, assistant_text: &str) {
        self.entries.push(format!("{}: {}", USER_LABEL, user_text));
        self.entries
            .push(format!("{}: {}", ASSISTANT_LABEL, assistant_text));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_greeting() {
        let transcript = Transcript::new("Hola, soy Manu.");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.entries()[0], "Manu: Hola, soy Manu.");
    }

    #[test]
    fn test_with_user_does_not_mutate() {
        let transcript = Transcript::new("saludo");
        let history = transcript.with_user("¿Qué es la IA?");

        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap(), "Usuario: ¿Qué es la IA?");
        // The log itself is unchanged until the turn completes
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_record_turn_appends_pair() {
        let mut transcript = Transcript::new("saludo");
        transcript.record_turn("¿Qué es la IA?", "La IA es...");

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.entries()[1], "Usuario: ¿Qué es la IA?");
        assert_eq!(transcript.entries()[2], "Manu: La IA es...");
    }

    #[test]
    fn test_entries_always_paired_after_seed() {
        let mut transcript = Transcript::new("saludo");
        transcript.record_turn("uno", "dos");
        transcript.record_turn("tres", "cuatro");
        // seed + n pairs
        assert_eq!(transcript.len() % 2, 1);
    }
}
