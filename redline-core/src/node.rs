//! Backend node handle.

use std::fmt;
use std::sync::Arc;

use crate::NodeLabel;

/// One backend connection endpoint a client can route commands to.
///
/// A `Node` pairs a descriptive [`NodeLabel`] with a shared connection handle.
/// Equality is identity-based: two nodes are equal only if they point to the
/// same connection instance, regardless of their labels. Cloning a node keeps
/// its identity.
///
/// ```
/// use redline_core::Node;
///
/// let a = Node::new("replica", "redis://10.0.0.1/");
/// let b = Node::new("replica", "redis://10.0.0.1/");
///
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct Node<C> {
    label: NodeLabel,
    connection: Arc<C>,
}

impl<C> Node<C> {
    /// Creates a node owning a fresh connection handle.
    pub fn new(label: impl Into<NodeLabel>, connection: C) -> Self {
        Self::from_shared(label, Arc::new(connection))
    }

    /// Creates a node around an already shared connection.
    ///
    /// Nodes built from clones of the same `Arc` compare equal.
    pub fn from_shared(label: impl Into<NodeLabel>, connection: Arc<C>) -> Self {
        Self {
            label: label.into(),
            connection,
        }
    }

    /// Label of this node.
    pub fn label(&self) -> &NodeLabel {
        &self.label
    }

    /// The connection this node routes to.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Shared handle to the connection.
    pub fn shared(&self) -> &Arc<C> {
        &self.connection
    }
}

impl<C> Clone for Node<C> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            connection: Arc::clone(&self.connection),
        }
    }
}

impl<C> PartialEq for Node<C> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.connection, &other.connection)
    }
}

impl<C> Eq for Node<C> {}

impl<C> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("label", &self.label)
            .field("connection", &Arc::as_ptr(&self.connection))
            .finish()
    }
}
