//! # Service Container
//!
//! Holds the shared service instances and wires them together.

pub mod config;
pub mod services;

pub use config::{ConfigError, NodeConfig};
pub use services::ServiceContainer;
