use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::ProviderError(msg.into())
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::ProviderError(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_failures_become_serialization_errors() {
        let err: DomainError = serde_json::from_str::<Vec<u8>>("][")
            .unwrap_err()
            .into();

        assert!(matches!(err, DomainError::SerializationError(_)));
        assert!(!err.is_provider_error());
    }

    #[test]
    fn test_io_failures_keep_their_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = DomainError::from(io);

        assert!(matches!(err, DomainError::IoError(_)));
        assert_eq!(err.to_string(), "I/O error: read-only");
    }

    #[test]
    fn test_provider_helper() {
        let err = DomainError::provider("429 RESOURCE_EXHAUSTED");

        assert!(err.is_provider_error());
        assert_eq!(err.to_string(), "Provider error: 429 RESOURCE_EXHAUSTED");
    }
}
