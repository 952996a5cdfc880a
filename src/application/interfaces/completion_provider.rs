use async_trait::async_trait;

use crate::domain::{DomainError, HistoryTurn};

/// Everything the provider needs to produce the next model turn.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub history: Vec<HistoryTurn>,
    pub new_text: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub model: String,
}

/// What came back from the provider. `text` is `None` when the reply carried
/// no text payload at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionResponse {
    pub text: Option<String>,
}

impl CompletionResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }
}

/// The hosted language-model endpoint.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Any failure (auth, network, rate limit, malformed reply) is
/// returned as an error; implementors never retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn generate(&self, request: &CompletionRequest)
        -> Result<CompletionResponse, DomainError>;

    /// Human readable provider name, for logging.
    fn name(&self) -> &str;
}
