use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::MessageStorage;
use crate::domain::DomainError;

/// Volatile storage slot; the conversation is lost when the process exits.
pub struct InMemoryMessageStorage {
    value: Arc<Mutex<Option<String>>>,
}

impl InMemoryMessageStorage {
    pub fn new() -> Self {
        Self {
            value: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.into()))),
        }
    }

    /// Current raw value of the slot.
    pub async fn snapshot(&self) -> Option<String> {
        self.value.lock().await.clone()
    }
}

impl Default for InMemoryMessageStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStorage for InMemoryMessageStorage {
    async fn read(&self) -> Result<Option<String>, DomainError> {
        Ok(self.value.lock().await.clone())
    }

    async fn write(&self, value: &str) -> Result<(), DomainError> {
        *self.value.lock().await = Some(value.to_string());
        Ok(())
    }
}
