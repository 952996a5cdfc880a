//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Storage (JSON file slot, in-memory slot)
//! - Completion providers (Gemini REST API, offline mock)
//! - User confirmation (stdin, fixed answer)
//! - Terminal presentation (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::{Container, ContainerConfig, Router};
