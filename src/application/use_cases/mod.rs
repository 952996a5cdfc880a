mod conversation_controller;

pub use conversation_controller::*;
