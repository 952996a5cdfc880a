//! # Application Layer
//!
//! The message store, the completion client, and the conversation use case
//! coordinating domain and connector layers.

pub mod interfaces;
pub mod services;
pub mod use_cases;

pub use interfaces::*;
pub use services::*;
pub use use_cases::*;
