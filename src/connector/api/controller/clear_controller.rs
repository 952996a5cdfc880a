use anyhow::Result;

use crate::application::{ConfirmationPrompt, CLEAR_CONFIRMATION};
use crate::connector::adapter::{AutoConfirm, StdinConfirmation};

use super::super::Container;

pub struct ClearController<'a> {
    container: &'a Container,
}

impl<'a> ClearController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Clears after asking on stdin, or straight away when `yes` is set.
    pub async fn clear(&self, yes: bool) -> Result<String> {
        let confirmed = if yes {
            true
        } else {
            ask_off_runtime(StdinConfirmation).await?
        };

        self.clear_with(&AutoConfirm(confirmed)).await
    }

    pub async fn clear_with(&self, prompt: &dyn ConfirmationPrompt) -> Result<String> {
        let cleared = self
            .container
            .controller()
            .clear_conversation(prompt)
            .await;

        Ok(if cleared {
            "Conversation history cleared.".to_string()
        } else {
            "Conversation history kept.".to_string()
        })
    }
}

/// Runs a blocking prompt on the blocking pool so the runtime keeps going.
async fn ask_off_runtime<P>(prompt: P) -> Result<bool>
where
    P: ConfirmationPrompt + 'static,
{
    let answer = tokio::task::spawn_blocking(move || prompt.confirm(CLEAR_CONFIRMATION)).await?;
    Ok(answer)
}
