use anyhow::Result;

use crate::connector::api::presenter::render_log;
use crate::domain::Message;

use super::super::Container;

pub struct HistoryController<'a> {
    container: &'a Container,
}

impl<'a> HistoryController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn history(&self, last: Option<usize>) -> Result<String> {
        let messages = self.container.controller().messages().await;
        Ok(self.format_log(&messages, last))
    }

    fn format_log(&self, messages: &[Message], last: Option<usize>) -> String {
        let skip = last
            .map(|n| messages.len().saturating_sub(n))
            .unwrap_or(0);
        let shown = &messages[skip..];

        format!(
            "{}\n\n({} of {} messages, stored in {})",
            render_log(shown),
            shown.len(),
            messages.len(),
            self.container.storage_location()
        )
    }
}
