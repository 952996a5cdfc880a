use async_trait::async_trait;

use crate::application::{CompletionProvider, CompletionRequest, CompletionResponse};
use crate::domain::DomainError;

/// Offline provider that answers deterministically without any network access.
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn generate(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, DomainError> {
        let prior_user_turns = request
            .history
            .iter()
            .filter(|turn| turn.role() == crate::domain::Role::User)
            .count();

        Ok(CompletionResponse::text(format!(
            "**Noted.** You said:\n\n> {}\n\n_{} earlier idea(s) in this conversation, model `{}`._",
            request.new_text.trim(),
            prior_user_turns,
            request.model
        )))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
