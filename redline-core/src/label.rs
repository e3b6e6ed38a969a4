//! Node label type for identifying backend endpoints.
//!
//! `NodeLabel` is a newtype wrapper around `SmolStr` naming one backend
//! endpoint, either by alias (`"replica-1"`) or by address (`"10.0.0.1:6379"`).
//! It is used in log lines, command records and metric labels.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A label identifying a backend node.
///
/// Labels are descriptive only. Node identity is decided by the connection a
/// [`Node`](crate::Node) points to, so two nodes may share a label.
///
/// # Example
/// ```
/// use redline_core::NodeLabel;
///
/// let label = NodeLabel::new("replica-1");
/// assert_eq!(label.as_str(), "replica-1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeLabel(SmolStr);

impl NodeLabel {
    /// Creates a new node label.
    #[inline]
    pub fn new(s: impl Into<SmolStr>) -> Self {
        Self(s.into())
    }

    /// Returns the label as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for NodeLabel {
    #[inline]
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

impl From<String> for NodeLabel {
    #[inline]
    fn from(s: String) -> Self {
        Self(SmolStr::from(s))
    }
}
