//! Node distribution strategies.
//!
//! A [`Distributor`] keeps a dynamic set of candidate nodes and answers
//! "which node should serve this command". Client adapters only talk to the
//! trait, so a strategy can be swapped without touching connection code.
//!
//! # Available Strategies
//!
//! - [`RandomDistributor`] - uniform random selection, ignores the routing key
//!
//! Key-hashing strategies (consistent hashing, cluster slots) are provided by
//! the Redis client itself and are not reimplemented here.

use thiserror::Error;

pub mod random;

pub use random::RandomDistributor;

/// Errors returned by node distribution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    /// No node is registered, there is no backend to route to.
    #[error("no backend node available: the node set is empty")]
    EmptyNodeSet,
}

/// Result of hashing a routing key.
///
/// This is an opaque value. Callers pass it back to the strategy that produced
/// it and must not branch on its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyHash {
    /// The strategy does not route by key.
    KeyIndependent,
}

/// Strategy for selecting a backend node per command.
///
/// The node set behaves like a multiset: adding the same node twice registers
/// it twice, and [`remove`](Distributor::remove) drops every entry equal to the
/// given node.
///
/// Mutation takes `&mut self`. Sharing one distributor between tasks requires
/// wrapping it in a lock, which also keeps reads consistent with concurrent
/// `add`/`remove` calls.
pub trait Distributor<N> {
    /// Registers a node.
    ///
    /// `weight` is part of the interface for weighted strategies and may be
    /// ignored.
    fn add(&mut self, node: N, weight: Option<u32>);

    /// Removes every registered entry equal to `node`.
    ///
    /// Removing a node that was never added is a no-op.
    fn remove(&mut self, node: &N);

    /// Selects the node that should serve a command routed by `key`.
    fn get(&mut self, key: &[u8]) -> Result<&N, DistributionError>;

    /// Hashes a routing key for this strategy.
    fn hash(&self, value: &[u8]) -> KeyHash;

    /// Currently registered nodes, duplicates included.
    fn nodes(&self) -> &[N];

    /// Number of registered entries.
    fn len(&self) -> usize {
        self.nodes().len()
    }

    /// Returns `true` if no node is registered.
    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }
}
