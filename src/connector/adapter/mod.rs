mod confirmation;
mod file_message_storage;
mod gemini_provider;
mod in_memory_message_storage;
mod mock_provider;

pub use confirmation::*;
pub use file_message_storage::*;
pub use gemini_provider::*;
pub use in_memory_message_storage::*;
pub use mock_provider::*;
