use std::collections::HashSet;
use std::sync::Arc;

use redis::aio::MultiplexedConnection;
use redis::{ConnectionInfo, IntoConnectionInfo};
use redline_core::{CommandInterceptor, Distributor, Node, RandomDistributor, TracingSink};
use redline_redis::{DistributedConnection, LoggingConnection};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Connection built from a [`ClientConfig`]: logged, randomly distributed
/// multiplexed connections.
pub type ConfiguredConnection = LoggingConnection<DistributedConnection<MultiplexedConnection>>;

/// Node selection strategy.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform random selection, see [`RandomDistributor`].
    #[default]
    Random,
}

/// Command logging settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Logging {
    /// Record commands and log them through `tracing`.
    #[serde(default)]
    pub enabled: bool,
    /// Connection label used in records and log lines.
    #[serde(default)]
    pub label: Option<String>,
}

/// One backend node.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NodeConfig {
    /// Unique alias of the node.
    pub alias: String,
    /// redis-rs connection string, e.g. `redis://10.0.0.1:6379`.
    pub connection_string: String,
    /// Selection weight, ignored by the random strategy.
    #[serde(default)]
    pub weight: Option<u32>,
}

/// Configuration of a client spreading commands over several nodes.
///
/// ```
/// use redline_configuration::{ClientConfig, Strategy};
///
/// let config = ClientConfig::from_yaml(r#"
/// strategy: Random
/// nodes:
///   - alias: replica-1
///     connection_string: "redis://10.0.0.1:6379"
/// "#).unwrap();
///
/// assert_eq!(config.strategy, Strategy::Random);
/// assert!(!config.logging.enabled);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Node selection strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// Command logging settings.
    #[serde(default)]
    pub logging: Logging,
    /// Database selected on every node, overriding any database in the
    /// connection strings.
    #[serde(default)]
    pub db: i64,
    /// Backend nodes.
    pub nodes: Vec<NodeConfig>,
}

impl ClientConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_saphyr::from_str(yaml).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that nodes exist, have unique aliases and connection strings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes.is_empty() {
            return Err(ConfigError::NoNodes);
        }
        let mut aliases = HashSet::new();
        for node in &self.nodes {
            if !aliases.insert(node.alias.as_str()) {
                return Err(ConfigError::DuplicateAlias(node.alias.clone()));
            }
            if node.connection_string.trim().is_empty() {
                return Err(ConfigError::EmptyConnectionString(node.alias.clone()));
            }
        }
        Ok(())
    }

    /// Label of the configured connection, `"default"` when unset.
    pub fn label(&self) -> &str {
        self.logging.label.as_deref().unwrap_or("default")
    }

    /// Builds the interceptor described by the logging settings.
    ///
    /// Without logging the interceptor only counts commands.
    pub fn interceptor(&self) -> CommandInterceptor {
        if self.logging.enabled {
            CommandInterceptor::with_sink(Arc::new(TracingSink))
        } else {
            CommandInterceptor::new()
        }
    }

    /// Builds an empty distributor for the configured strategy.
    pub fn distributor<C>(&self) -> RandomDistributor<Node<C>> {
        match self.strategy {
            Strategy::Random => RandomDistributor::new(),
        }
    }

    /// Connection parameters of `node` with the configured database applied.
    pub fn connection_info(&self, node: &NodeConfig) -> Result<ConnectionInfo, ConfigError> {
        let info = node
            .connection_string
            .as_str()
            .into_connection_info()
            .map_err(|source| ConfigError::Connection {
                alias: node.alias.clone(),
                source,
            })?;
        let settings = info.redis_settings().clone().set_db(self.db);
        Ok(info.set_redis_settings(settings))
    }

    /// Opens a multiplexed connection per node and registers it.
    pub async fn connect_distributed(
        &self,
    ) -> Result<DistributedConnection<MultiplexedConnection>, ConfigError> {
        self.validate()?;
        let mut distributor = self.distributor();
        for node in &self.nodes {
            let connection = connect(node, self.connection_info(node)?).await?;
            tracing::debug!(alias = %node.alias, "node connected");
            distributor.add(Node::new(node.alias.as_str(), connection), node.weight);
        }
        Ok(DistributedConnection::new(distributor).with_db(self.db))
    }

    /// Connects every node and wraps the result with command logging.
    pub async fn connect(&self) -> Result<ConfiguredConnection, ConfigError> {
        let distributed = self.connect_distributed().await?;
        Ok(LoggingConnection::new(
            distributed,
            self.interceptor(),
            self.label(),
        ))
    }
}

async fn connect(
    node: &NodeConfig,
    info: ConnectionInfo,
) -> Result<MultiplexedConnection, ConfigError> {
    let to_error = |source| ConfigError::Connection {
        alias: node.alias.clone(),
        source,
    };
    let client = redis::Client::open(info).map_err(to_error)?;
    client
        .get_multiplexed_async_connection()
        .await
        .map_err(to_error)
}
