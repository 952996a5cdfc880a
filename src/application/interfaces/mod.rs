mod completion_provider;
mod confirmation_prompt;
mod message_storage;

pub use completion_provider::*;
pub use confirmation_prompt::*;
pub use message_storage::*;
