//! Error types for tree operations

use super::kind::NodeKind;
use super::node::NodeId;
use thiserror::Error;

/// Errors raised by structural tree operations.
///
/// None of these are transient: the tree is left exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A non-root-capable node was created with no explicit parent and no open context
    #[error("{kind} needs a parent, but none was given and no context is open")]
    NoParentAvailable { kind: NodeKind },

    /// The requested parent is dead, a leaf, or does not accept this kind of child
    #[error("{child} cannot be attached: {reason}")]
    InvalidParent { child: NodeKind, reason: String },

    /// The new parent is the moved node itself or one of its descendants
    #[error("cannot move {node} under {new_parent}: the node would become its own ancestor")]
    CycleDetected { node: NodeId, new_parent: NodeId },

    /// The id does not refer to a live node of this tree
    #[error("node {0} is not part of this tree")]
    UnknownNode(NodeId),

    /// The node payload breaks one of its own rules (e.g. a grid with too many titles)
    #[error("invalid {kind} attributes: {message}")]
    InvalidAttributes { kind: NodeKind, message: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
