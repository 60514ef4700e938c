//! Error types for document emission

use crate::tree::{NodeId, NodeKind, TreeError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A tab needs exactly one title per child
    #[error("tab {node} has {titles} titles but {items} items")]
    TabTitleMismatch {
        node: NodeId,
        titles: usize,
        items: usize,
    },

    #[error("grid {node} has {children} children but only {capacity} cells")]
    GridOverflow {
        node: NodeId,
        children: usize,
        capacity: usize,
    },

    /// The leaf renderer could not produce markup for a node
    #[error("cannot render {kind} {node}: {message}")]
    Leaf {
        node: NodeId,
        kind: NodeKind,
        message: String,
    },

    /// The document root is not a live node of the tree
    #[error(transparent)]
    Tree(#[from] TreeError),
}
