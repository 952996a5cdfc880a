use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Greeting shown as the first entry of every fresh conversation.
pub const WELCOME_MESSAGE: &str = "\
Hi! I'm your **Second Brain**, a content strategy assistant.

Dump your raw thoughts, half-finished ideas, or questions about what to post \
and I'll help shape them into hooks, threads, and scripts.

Tip: use **Generate Daily Summary** at the end of the day to get a recap of \
today's ideas and a plan for tomorrow.";

/// Shown in place of a reply when the completion request fails.
pub const ERROR_APOLOGY: &str = "Sorry, I encountered an issue processing that. Please try again.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the conversation log.
///
/// Messages are immutable once created: the log only ever grows, or is
/// replaced wholesale when the conversation is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: String,
    role: Role,
    text: String,
    timestamp: DateTime<Utc>,
    /// Marks a model message as a synthesized failure notice.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    is_error: bool,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    /// A model message standing in for a reply that could not be produced.
    pub fn error() -> Self {
        Self {
            is_error: true,
            ..Self::model(ERROR_APOLOGY)
        }
    }

    pub fn welcome() -> Self {
        Self::model(WELCOME_MESSAGE)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_creation() {
        let msg = Message::user("hello");

        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.text(), "hello");
        assert!(!msg.is_error());
        assert!(Uuid::parse_str(msg.id()).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Message::user("same");
        let b = Message::user("same");

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_error_message_is_flagged_model_apology() {
        let msg = Message::error();

        assert_eq!(msg.role(), Role::Model);
        assert_eq!(msg.text(), ERROR_APOLOGY);
        assert!(msg.is_error());
    }

    #[test]
    fn test_welcome_message() {
        let msg = Message::welcome();

        assert_eq!(msg.role(), Role::Model);
        assert_eq!(msg.text(), WELCOME_MESSAGE);
        assert!(!msg.is_error());
    }

    #[test]
    fn test_json_shape() {
        let msg = Message::user("hi");
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["role"], "user");
        assert_eq!(value["text"], "hi");
        assert!(value["timestamp"].is_string());
        assert!(value.get("isError").is_none());

        let err = serde_json::to_value(Message::error()).unwrap();
        assert_eq!(err["role"], "model");
        assert_eq!(err["isError"], true);
    }

    #[test]
    fn test_deserialize_without_is_error_field() {
        let json = r#"{"id":"abc","role":"model","text":"hey","timestamp":"2024-05-01T18:00:00.000Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();

        assert_eq!(msg.id(), "abc");
        assert_eq!(msg.role(), Role::Model);
        assert!(!msg.is_error());
        assert_eq!(msg.timestamp().to_rfc3339(), "2024-05-01T18:00:00+00:00");
    }
}
