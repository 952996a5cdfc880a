use async_trait::async_trait;

use crate::domain::DomainError;

/// A single durable slot holding the serialized conversation log.
///
/// Implementations only move opaque strings; (de)serialization of the log
/// belongs to [`crate::application::MessageStore`].
#[async_trait]
pub trait MessageStorage: Send + Sync {
    /// Returns the stored value, or `None` when nothing has been written yet.
    async fn read(&self) -> Result<Option<String>, DomainError>;

    /// Overwrites the stored value.
    async fn write(&self, value: &str) -> Result<(), DomainError>;
}
