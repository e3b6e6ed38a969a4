//! Per-command node selection over a set of redis-rs async connections.

use std::marker::PhantomData;

use redis::aio::ConnectionLike;
use redis::{Cmd, Pipeline, RedisFuture, RedisResult, Value};
use redline_core::{Distributor, Node, RandomDistributor};
use tracing::trace;

use crate::command::routing_key;
use crate::error::Error;

/// Async connection routing every command to a node picked by a [`Distributor`].
///
/// Node connections are cloned per command, so `C` should be a cheap handle
/// such as [`MultiplexedConnection`] or [`ConnectionManager`]. A pipeline is
/// sent to a single node as a whole.
///
/// With no node registered every command fails with a connection error.
///
/// [`MultiplexedConnection`]: redis::aio::MultiplexedConnection
/// [`ConnectionManager`]: redis::aio::ConnectionManager
pub struct DistributedConnection<C, D = RandomDistributor<Node<C>>> {
    distributor: D,
    db: i64,
    _connection: PhantomData<fn() -> C>,
}

impl<C> DistributedConnection<C, RandomDistributor<Node<C>>> {
    /// Creates a connection spreading commands randomly over `nodes`.
    pub fn random(nodes: impl IntoIterator<Item = Node<C>>) -> Self {
        let mut distributor = RandomDistributor::new();
        for node in nodes {
            distributor.add(node, None);
        }
        Self::new(distributor)
    }
}

impl<C, D> DistributedConnection<C, D>
where
    D: Distributor<Node<C>>,
{
    /// Creates a connection routing through `distributor`.
    pub fn new(distributor: D) -> Self {
        Self {
            distributor,
            db: 0,
            _connection: PhantomData,
        }
    }

    /// Sets the database number reported by [`ConnectionLike::get_db`].
    #[must_use]
    pub fn with_db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    /// Registers a node.
    pub fn add_node(&mut self, node: Node<C>, weight: Option<u32>) {
        trace!(node = %node.label(), "node added");
        self.distributor.add(node, weight);
    }

    /// Removes every entry of `node`.
    pub fn remove_node(&mut self, node: &Node<C>) {
        trace!(node = %node.label(), "node removed");
        self.distributor.remove(node);
    }

    /// Currently registered nodes.
    pub fn nodes(&self) -> &[Node<C>] {
        self.distributor.nodes()
    }

    /// The distribution strategy.
    pub fn distributor(&self) -> &D {
        &self.distributor
    }
}

impl<C, D> DistributedConnection<C, D>
where
    C: Clone,
    D: Distributor<Node<C>>,
{
    fn select(&mut self, key: &[u8]) -> RedisResult<C> {
        let node = self.distributor.get(key).map_err(Error::from)?;
        trace!(node = %node.label(), "command routed");
        Ok(node.connection().clone())
    }
}

impl<C, D> ConnectionLike for DistributedConnection<C, D>
where
    C: ConnectionLike + Clone + Send,
    D: Distributor<Node<C>> + Send,
{
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        Box::pin(async move {
            let mut connection = self.select(routing_key(cmd))?;
            connection.req_packed_command(cmd).await
        })
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        cmd: &'a Pipeline,
        offset: usize,
        count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        Box::pin(async move {
            let mut connection = self.select(&[])?;
            connection.req_packed_commands(cmd, offset, count).await
        })
    }

    fn get_db(&self) -> i64 {
        self.db
    }
}

impl<C, D> std::fmt::Debug for DistributedConnection<C, D>
where
    D: Distributor<Node<C>>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<_> = self
            .distributor
            .nodes()
            .iter()
            .map(|node| node.label().as_str())
            .collect();
        f.debug_struct("DistributedConnection")
            .field("nodes", &labels)
            .field("db", &self.db)
            .finish()
    }
}
