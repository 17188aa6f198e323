//! Contract violations reported to the host.
//!
//! These are distinct from [`Diagnostic`](crate::diagnostics::Diagnostic)s:
//! a `LayoutError` means the caller asked for something the tree cannot
//! answer (an unknown node, a reflow before anything was rendered) and the
//! operation was not applied.

use std::fmt;

use crate::tree::NodeId;

/// Errors from tree mutations, reflow and drag-resize operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    MissingNode {
        node: NodeId,
    },
    NotAPanel {
        node: NodeId,
    },
    NotASeparator {
        node: NodeId,
    },
    /// No measured extent is available for `node`; the host has not rendered it yet.
    NotRendered {
        node: NodeId,
    },
    InvalidMeasurement {
        node: NodeId,
        value: f64,
    },
    /// The two nodes are not neighbouring sizable children of one container.
    NotAdjacent {
        first: NodeId,
        second: NodeId,
    },
    RootRemoval {
        node: NodeId,
    },
    /// The tree has run out of node ids; nothing was changed.
    IdOverflow {
        current: NodeId,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { node } => write!(f, "node {node} not found"),
            Self::NotAPanel { node } => write!(f, "node {node} is not a panel"),
            Self::NotASeparator { node } => write!(f, "node {node} is not a separator"),
            Self::NotRendered { node } => write!(
                f,
                "node {node} has no measured extent; reflow requires a rendered tree"
            ),
            Self::InvalidMeasurement { node, value } => {
                write!(f, "node {node} reported invalid extent {value}")
            }
            Self::NotAdjacent { first, second } => write!(
                f,
                "nodes {first} and {second} are not adjacent sizable siblings"
            ),
            Self::RootRemoval { node } => write!(f, "root node {node} cannot be removed"),
            Self::IdOverflow { current } => {
                write!(f, "node id space exhausted at {current}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
