use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ClearController, HistoryController, MessageController};

pub struct Router<'a> {
    message_controller: MessageController<'a>,
    history_controller: HistoryController<'a>,
    clear_controller: ClearController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            message_controller: MessageController::new(container),
            history_controller: HistoryController::new(container),
            clear_controller: ClearController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Send { text } => self.message_controller.send(text.join(" ")).await,
            Commands::Summary => self.message_controller.summary().await,
            Commands::History { last } => self.history_controller.history(last).await,
            Commands::Clear { yes } => self.clear_controller.clear(yes).await,
            Commands::Chat => unreachable!("Chat command is handled separately in main"),
        }
    }
}
