pub mod container;
pub mod controller;
pub mod presenter;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use router::Router;
