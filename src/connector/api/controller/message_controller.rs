use anyhow::Result;

use crate::application::SendOutcome;
use crate::connector::api::presenter::render_message;

use super::super::Container;

pub struct MessageController<'a> {
    container: &'a Container,
}

impl<'a> MessageController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn send(&self, text: String) -> Result<String> {
        let outcome = self.container.controller().handle_send_message(&text).await;
        Ok(self.format_outcome(&outcome))
    }

    pub async fn summary(&self) -> Result<String> {
        let outcome = self.container.controller().trigger_daily_summary().await;
        Ok(self.format_outcome(&outcome))
    }

    fn format_outcome(&self, outcome: &SendOutcome) -> String {
        match outcome.reply() {
            Some(reply) => render_message(reply),
            None => "Nothing to send.".to_string(),
        }
    }
}
