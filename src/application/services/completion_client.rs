use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error};

use crate::application::{CompletionProvider, CompletionRequest};
use crate::domain::{format_history, DomainError, Message};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Sampling temperature: creative, but grounded in what the user wrote.
pub const TEMPERATURE: f32 = 0.7;

/// Returned instead of an empty string when the provider sends back no text.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Thinking...";

/// Out-of-band marker asking the assistant for the end-of-day recap.
///
/// The system instruction documents this marker; application code never
/// inspects message text for it.
pub const DAILY_SUMMARY_SENTINEL: &str = "[SYSTEM_EVENT: DAILY_SUMMARY_1800]";

/// Persona and task description sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are \"Second Brain\", a personal content strategy assistant for a solo creator.

The user dumps raw thoughts, observations, and half-formed ideas into this chat \
throughout the day. For each message:
1. Capture the core idea in one sentence.
2. Suggest how it could become content: a hook, a thread outline, or a short \
video script.
3. Keep answers concise and formatted in Markdown. Use tables for scripts \
(columns: Scene, Visual, Voiceover).

Control event contract:
When a user turn consists exactly of `[SYSTEM_EVENT: DAILY_SUMMARY_1800]`, it \
was not typed by the user. It is the scheduled end-of-day trigger. Respond with \
a \"Daily Summary\" that:
- lists the ideas captured today from the conversation history,
- picks the single strongest idea and explains why,
- proposes a concrete posting plan for tomorrow.
Never mention the control marker itself in your reply.";

/// Stateless adapter between the conversation log and a [`CompletionProvider`].
///
/// Each call replays the full history plus the fixed persona and
/// temperature, then returns the provider's text. Errors are logged and
/// propagated unchanged; nothing is retried here.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, history: &[Message], new_text: &str) -> Result<String, DomainError> {
        self.complete_with_model(history, new_text, &self.model).await
    }

    pub async fn complete_with_model(
        &self,
        history: &[Message],
        new_text: &str,
        model: &str,
    ) -> Result<String, DomainError> {
        let request = CompletionRequest {
            history: format_history(history),
            new_text: new_text.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature: TEMPERATURE,
            model: model.to_string(),
        };

        debug!(
            "Requesting completion from {} ({}) with {} history turns",
            self.provider.name(),
            model,
            request.history.len()
        );

        let start_time = Instant::now();
        let response = self.provider.generate(&request).await.map_err(|e| {
            error!("{} API error: {}", self.provider.name(), e);
            e
        })?;

        debug!("Completion finished in {:?}", start_time.elapsed());

        Ok(match response.text {
            Some(text) if !text.is_empty() => text,
            _ => EMPTY_RESPONSE_FALLBACK.to_string(),
        })
    }
}
