mod history_turn;
mod message;

pub use history_turn::*;
pub use message::*;
