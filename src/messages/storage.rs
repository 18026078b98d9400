use super::types::Message;
use parking_lot::RwLock;
use std::sync::Arc;

/// Append-only, thread-safe store for the conversation shown in the UI.
#[derive(Debug, Clone)]
pub struct MessageStorage {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStorage {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add(&self, message: Message) {
        self.messages.write().push(message);
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Sender;

    #[test]
    fn test_append_order_is_preserved() {
        let storage = MessageStorage::new();
        storage.add(Message::user("primero"));
        storage.add(Message::assistant("segundo"));

        let all = storage.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "primero");
        assert_eq!(all[1].sender, Sender::Assistant);
        assert_eq!(storage.last().unwrap().text, "segundo");
    }

    #[test]
    fn test_empty_storage() {
        let storage = MessageStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.len(), 0);
        assert!(storage.last().is_none());
    }
}
