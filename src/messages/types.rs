use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

/// A single entry in the rendered conversation.
///
/// Messages are created on each user submission and each assistant
/// response (or error fallback) and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("hola");
        assert_eq!(user.sender, Sender::User);
        assert!(user.is_user());

        let assistant = Message::assistant("¡Hola!");
        assert_eq!(assistant.sender, Sender::Assistant);
        assert!(!assistant.is_user());
    }

    #[test]
    fn test_messages_have_unique_ids() {
        let a = Message::user("uno");
        let b = Message::user("uno");
        assert_ne!(a.id, b.id);
    }
}
