mod completion_client;
mod message_store;

pub use completion_client::*;
pub use message_store::*;
