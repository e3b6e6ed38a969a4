//! Error types for the Redis adapters.
//!
//! Adapters implement `redis::aio::ConnectionLike`, so every failure has to
//! surface as a [`RedisError`]. [`Error`] is the crate-level type and converts
//! into it losslessly for Redis failures.

use std::io;

use redis::RedisError;
use redline_core::DistributionError;

/// Error type for Redis adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the underlying Redis client.
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    /// No node could be selected for a command.
    ///
    /// Returned when a [`DistributedConnection`](crate::DistributedConnection)
    /// has no registered node.
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}

impl From<Error> for RedisError {
    fn from(error: Error) -> Self {
        match error {
            Error::Redis(error) => error,
            Error::Distribution(error) => io::Error::new(io::ErrorKind::NotConnected, error).into(),
        }
    }
}
