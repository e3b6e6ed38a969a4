#![warn(missing_docs)]
//! # redline-redis
//!
//! Adapters plugging `redline-core` into redis-rs async connections.
//!
//! - [`LoggingConnection`] wraps any `redis::aio::ConnectionLike` and reports
//!   every command to a [`CommandInterceptor`](redline_core::CommandInterceptor).
//! - [`DistributedConnection`] routes every command to a node chosen by a
//!   [`Distributor`](redline_core::Distributor), random by default.
//!
//! Both implement `redis::aio::ConnectionLike` themselves, so they compose:
//!
//! ```no_run
//! use std::sync::Arc;
//! use redline_core::{CommandInterceptor, Node, TracingSink};
//! use redline_redis::{DistributedConnection, LoggingConnection};
//!
//! # async fn run() -> redis::RedisResult<()> {
//! let mut nodes = Vec::new();
//! for (alias, url) in [("replica-1", "redis://10.0.0.1/"), ("replica-2", "redis://10.0.0.2/")] {
//!     let connection = redis::Client::open(url)?
//!         .get_multiplexed_async_connection()
//!         .await?;
//!     nodes.push(Node::new(alias, connection));
//! }
//!
//! let replicas = DistributedConnection::random(nodes);
//! let interceptor = CommandInterceptor::with_sink(Arc::new(TracingSink));
//! let mut connection = LoggingConnection::new(replicas, interceptor, "replicas");
//!
//! let _: Option<String> = redis::cmd("GET").arg("user:1").query_async(&mut connection).await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod distributed;
pub mod error;
pub mod logging;

#[doc(inline)]
pub use crate::distributed::DistributedConnection;
#[doc(inline)]
pub use crate::error::Error;
#[doc(inline)]
pub use crate::logging::LoggingConnection;
