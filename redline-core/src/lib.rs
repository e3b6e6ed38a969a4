#![warn(missing_docs)]
//! # redline-core
//!
//! Client-side building blocks shared by the redline Redis integrations.
//!
//! This crate has no I/O of its own. It provides two independent pieces that a
//! client composes around its connections:
//!
//! - **Distribution** - a [`Distributor`] picks the [`Node`] that serves a
//!   command. [`RandomDistributor`] spreads load uniformly over read replicas.
//! - **Interception** - a [`CommandInterceptor`] times every command, keeps a
//!   [`CommandRecord`] per command and writes a line to a [`CommandSink`].
//!
//! Connection adapters for the `redis` crate live in `redline-redis`.
//!
//! ## Feature Flags
//!
//! - `metrics` - export command counters and durations via the `metrics` crate

pub mod distribution;
pub mod interceptor;
pub mod label;
pub mod metrics;
pub mod node;

pub use distribution::{DistributionError, Distributor, KeyHash, RandomDistributor};
pub use interceptor::{
    Argument, Command, CommandInterceptor, CommandRecord, CommandSink, InterceptorError,
    TracingSink, render_command,
};
pub use label::NodeLabel;
pub use node::Node;
