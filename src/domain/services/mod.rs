//! Domain services containing core business logic.

mod history_formatter;

pub use history_formatter::*;
