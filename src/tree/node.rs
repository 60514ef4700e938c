//! Node identity and storage
//!
//! Nodes live in the arena owned by [`Tree`](super::Tree). A [`NodeId`] is an index into that
//! arena plus a generation counter, so an id kept around after its node was pruned never aliases
//! a node created later in the same slot.

use super::elements::NodeData;
use super::kind::NodeKind;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// A node of the report tree: typed payload, parent link and owned children.
///
/// Structure is only changed through [`Tree`](super::Tree); this type is read-only to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn label(&self) -> Option<&str> {
        self.data.label()
    }
}
