pub mod chat_controller;
pub mod clear_controller;
pub mod history_controller;
pub mod message_controller;

pub use chat_controller::ChatController;
pub use clear_controller::ClearController;
pub use history_controller::HistoryController;
pub use message_controller::MessageController;
