#![warn(missing_docs)]
//! YAML configuration for redline clients.
//!
//! A [`ClientConfig`] lists the backend nodes, the node selection strategy and
//! the command logging settings, and builds the matching connection:
//!
//! ```yaml
//! strategy: Random
//! logging:
//!   enabled: true
//!   label: replicas
//! nodes:
//!   - alias: replica-1
//!     connection_string: "redis://10.0.0.1:6379"
//!   - alias: replica-2
//!     connection_string: "redis://10.0.0.2:6379"
//!     weight: 2
//! ```

mod client;
mod error;

pub use client::{ClientConfig, ConfiguredConnection, Logging, NodeConfig, Strategy};
pub use error::ConfigError;
