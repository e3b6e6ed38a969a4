//! Random distribution strategy.
//!
//! Spreads commands uniformly over the registered nodes. The routing key is
//! ignored, so the same key may land on a different node on every call. This
//! suits read replicas where load spreading matters and key affinity does not.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{DistributionError, Distributor, KeyHash};

/// Uniform random node selection.
///
/// Weights passed to [`add`](Distributor::add) are accepted and ignored.
///
/// # Example
///
/// ```
/// use redline_core::{Distributor, Node, RandomDistributor};
///
/// let primary = Node::new("replica-1", "redis://10.0.0.1/");
/// let mut distributor = RandomDistributor::seeded(7);
/// distributor.add(primary.clone(), None);
///
/// assert_eq!(distributor.get(b"user:1").unwrap(), &primary);
/// ```
#[derive(Debug, Clone)]
pub struct RandomDistributor<N, R = StdRng> {
    nodes: Vec<N>,
    rng: R,
}

impl<N> RandomDistributor<N, StdRng> {
    /// Creates an empty distributor seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an empty distributor with a fixed seed.
    ///
    /// Selection order is reproducible for a given seed and insertion order.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<N> Default for RandomDistributor<N, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, R> RandomDistributor<N, R>
where
    R: Rng,
{
    /// Creates an empty distributor drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            nodes: Vec::new(),
            rng,
        }
    }
}

impl<N, R> Distributor<N> for RandomDistributor<N, R>
where
    N: PartialEq,
    R: Rng,
{
    fn add(&mut self, node: N, _weight: Option<u32>) {
        self.nodes.push(node);
    }

    fn remove(&mut self, node: &N) {
        self.nodes.retain(|registered| registered != node);
    }

    fn get(&mut self, _key: &[u8]) -> Result<&N, DistributionError> {
        if self.nodes.is_empty() {
            return Err(DistributionError::EmptyNodeSet);
        }
        let index = self.rng.gen_range(0..self.nodes.len());
        tracing::trace!(index, total = self.nodes.len(), "random node selected");
        Ok(&self.nodes[index])
    }

    fn hash(&self, _value: &[u8]) -> KeyHash {
        KeyHash::KeyIndependent
    }

    fn nodes(&self) -> &[N] {
        &self.nodes
    }
}
