use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::MessageStorage;
use crate::domain::{DomainError, Message};

/// Ordered, append-only conversation log backed by a [`MessageStorage`] slot.
///
/// Every mutation writes the full log back to storage before returning.
/// Storage failures are logged and swallowed: the in-memory log stays the
/// source of truth for the running session.
pub struct MessageStore {
    storage: Arc<dyn MessageStorage>,
    messages: Vec<Message>,
}

impl MessageStore {
    /// Revives the persisted log, seeding a welcome message when there is
    /// nothing usable in storage.
    pub async fn open(storage: Arc<dyn MessageStorage>) -> Self {
        let mut store = Self {
            storage,
            messages: Vec::new(),
        };

        store.messages = store.load().await;
        if store.messages.is_empty() {
            info!("No conversation history found, starting a fresh conversation");
            store.reset(Message::welcome()).await;
        } else {
            info!("Loaded {} messages from history", store.messages.len());
        }

        store
    }

    /// Reads and decodes the persisted log.
    ///
    /// Absent, blank, or malformed data all yield an empty log.
    pub async fn load(&self) -> Vec<Message> {
        let raw = match self.storage.read().await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Failed to read conversation history: {}", e);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match decode_log(&raw) {
            Ok(messages) => messages,
            Err(e) => {
                error!("Failed to load history: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn append(&mut self, message: Message) {
        debug!("Appending {} message {}", message.role(), message.id());
        self.messages.push(message);
        self.persist(&self.messages).await;
    }

    /// Replaces the whole log with a single message.
    pub async fn reset(&mut self, welcome: Message) {
        self.messages = vec![welcome];
        self.persist(&self.messages).await;
    }

    /// Best-effort write of `log` to storage.
    pub async fn persist(&self, log: &[Message]) {
        let encoded = match encode_log(log) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Failed to serialize conversation history: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.write(&encoded).await {
            warn!("Failed to persist conversation history: {}", e);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Serializes a log into the persisted JSON array format.
pub fn encode_log(messages: &[Message]) -> Result<String, DomainError> {
    Ok(serde_json::to_string(messages)?)
}

/// Parses the persisted JSON array format, reviving timestamps.
pub fn decode_log(raw: &str) -> Result<Vec<Message>, DomainError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::InMemoryMessageStorage;
    use crate::domain::{Role, WELCOME_MESSAGE};
    use async_trait::async_trait;

    struct BrokenStorage;

    #[async_trait]
    impl MessageStorage for BrokenStorage {
        async fn read(&self) -> Result<Option<String>, DomainError> {
            Err(DomainError::storage("disk on fire"))
        }

        async fn write(&self, _value: &str) -> Result<(), DomainError> {
            Err(DomainError::storage("disk on fire"))
        }
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let log = vec![
            Message::welcome(),
            Message::user("What should I post today?"),
            Message::error(),
        ];

        let decoded = decode_log(&encode_log(&log).unwrap()).unwrap();

        assert_eq!(decoded.len(), log.len());
        for (before, after) in log.iter().zip(decoded.iter()) {
            assert_eq!(before.id(), after.id());
            assert_eq!(before.role(), after.role());
            assert_eq!(before.text(), after.text());
            assert_eq!(before.is_error(), after.is_error());
            assert_eq!(before.timestamp(), after.timestamp());
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_log("{not json").is_err());
        assert!(decode_log(r#"[{"id":"x"}]"#).is_err());
    }

    #[tokio::test]
    async fn test_open_empty_storage_seeds_and_persists_welcome() {
        let storage = Arc::new(InMemoryMessageStorage::new());
        let store = MessageStore::open(storage.clone()).await;

        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].role(), Role::Model);
        assert_eq!(store.messages()[0].text(), WELCOME_MESSAGE);

        let persisted = decode_log(&storage.snapshot().await.unwrap()).unwrap();
        assert_eq!(persisted, store.messages());
    }

    #[tokio::test]
    async fn test_open_is_idempotent_on_fresh_storage() {
        let storage = Arc::new(InMemoryMessageStorage::new());

        let first = MessageStore::open(storage.clone()).await;
        let second = MessageStore::open(storage.clone()).await;

        assert_eq!(second.len(), 1);
        assert_eq!(second.messages()[0].id(), first.messages()[0].id());
    }

    #[tokio::test]
    async fn test_open_corrupt_storage_starts_fresh() {
        let storage = Arc::new(InMemoryMessageStorage::with_value("][ nope"));
        let store = MessageStore::open(storage).await;

        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].text(), WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn test_load_blank_value_is_empty() {
        let storage = Arc::new(InMemoryMessageStorage::with_value("   "));
        let store = MessageStore {
            storage,
            messages: Vec::new(),
        };

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_persists_full_log() {
        let storage = Arc::new(InMemoryMessageStorage::new());
        let mut store = MessageStore::open(storage.clone()).await;

        store.append(Message::user("idea")).await;
        store.append(Message::model("reply")).await;

        let persisted = decode_log(&storage.snapshot().await.unwrap()).unwrap();
        assert_eq!(persisted.len(), 3);
        assert_eq!(persisted[1].text(), "idea");
        assert_eq!(persisted[2].text(), "reply");
        assert_eq!(store.last().map(Message::text), Some("reply"));
    }

    #[tokio::test]
    async fn test_reset_replaces_log() {
        let storage = Arc::new(InMemoryMessageStorage::new());
        let mut store = MessageStore::open(storage.clone()).await;
        store.append(Message::user("idea")).await;

        let fresh = Message::welcome();
        store.reset(fresh.clone()).await;

        assert_eq!(store.messages(), &[fresh.clone()]);
        let reopened = MessageStore::open(storage).await;
        assert_eq!(reopened.messages(), &[fresh]);
    }

    #[tokio::test]
    async fn test_storage_failures_are_not_fatal() {
        let mut store = MessageStore::open(Arc::new(BrokenStorage)).await;
        assert_eq!(store.len(), 1);

        store.append(Message::user("still works")).await;
        assert_eq!(store.len(), 2);
    }
}
