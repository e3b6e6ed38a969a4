use thiserror::Error;

/// Errors raised while loading a client configuration or connecting its nodes.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Parse(String),

    /// The configuration lists no node.
    #[error("at least one node must be configured")]
    NoNodes,

    /// Two nodes share the same alias.
    #[error("duplicate node alias: {0}")]
    DuplicateAlias(String),

    /// A node has an empty connection string.
    #[error("node {0} has an empty connection string")]
    EmptyConnectionString(String),

    /// A node could not be opened or connected.
    #[error("node {alias}: {source}")]
    Connection {
        /// Alias of the failing node.
        alias: String,
        /// Underlying Redis error.
        #[source]
        source: redis::RedisError,
    },
}
