use chrono::Local;

use crate::domain::{Message, Role};

const ASSISTANT_NAME: &str = "Second Brain";

/// Plain-text rendering of one message; markdown is printed as-is.
pub fn render_message(message: &Message) -> String {
    let time = message
        .timestamp()
        .with_timezone(&Local)
        .format("%H:%M");

    let author = match message.role() {
        Role::User => "You".to_string(),
        Role::Model if message.is_error() => {
            format!("{ASSISTANT_NAME} [Error generating response]")
        }
        Role::Model => ASSISTANT_NAME.to_string(),
    };

    format!("[{time}] {author}\n{}", message.text().trim_end())
}

pub fn render_log(messages: &[Message]) -> String {
    messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}
