//! The report tree
//!
//!     A report is a tree of typed nodes: a report root, numbered sections, layout containers
//!     (tabs, folds, grids) and leaf content (text, code, images, tables...). The tree is what
//!     every other part of the crate works on: the builder grows it, the persistence layer turns
//!     it into records and back, the outline and HTML renderers walk it.
//!
//! Ownership
//!
//!     Nodes live in an arena owned by [`Tree`] and are addressed by [`NodeId`]. A node owns the
//!     ordered list of its children's ids; the parent link is a plain id, so there is no shared
//!     ownership and no reference cycle to manage. A node belongs to exactly one tree.
//!
//!     The structure invariants hold after every public call:
//!
//!         - every non-root node appears in its parent's children exactly once, and in no other
//!           children list;
//!         - no node is its own ancestor;
//!         - every parent/child pair satisfies the parent's [`NestingPolicy`].
//!
//!     The only way to change a node's parent is [`Tree::reparent`] (and its shorthands
//!     [`Tree::remove`] and [`Tree::prune`]). Every structural call validates first and mutates
//!     second, so a failing call leaves the tree untouched.
//!
//! Queries
//!
//!     Depth, ancestors and section numbers are computed on demand by walking parent links. They
//!     are never cached: moving a subtree changes all of them for every node in it.

pub mod elements;
pub mod error;
pub mod kind;
pub mod node;

pub use elements::{Element, NodeData};
pub use error::{TreeError, TreeResult};
pub use kind::{NestingPolicy, NodeKind};
pub use node::{Node, NodeId};

use crate::context::ContextStack;
use std::ops::Index;
use tracing::debug;

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena holding one or more report trees (a forest: detached subtrees stay addressable until
/// pruned).
#[derive(Debug, Clone, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Like [`Tree::get`], but reports a dead id as an error
    pub fn node(&self, id: NodeId) -> TreeResult<&Node> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    /// Live nodes in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node
                .as_ref()
                .map(|node| (NodeId::new(index as u32, slot.generation), node))
        })
    }

    /// Ids of all live parentless nodes
    pub fn roots(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id)
            .collect()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a node under an explicit parent, or as a root when `parent` is `None`.
    ///
    /// Only root-capable kinds (reports and sections) may be created without a parent.
    pub fn create(
        &mut self,
        data: impl Into<NodeData>,
        parent: Option<NodeId>,
    ) -> TreeResult<NodeId> {
        let data = data.into();
        let kind = data.kind();
        data.validate()
            .map_err(|message| TreeError::InvalidAttributes { kind, message })?;

        match parent {
            Some(parent) => {
                self.check_attach(parent, kind)?;
                let id = self.insert(Node::new(data));
                self.link(id, parent);
                debug!(node = %id, %kind, %parent, "created node");
                Ok(id)
            }
            None if kind.is_root_capable() => {
                let id = self.insert(Node::new(data));
                debug!(node = %id, %kind, "created root");
                Ok(id)
            }
            None => Err(TreeError::NoParentAvailable { kind }),
        }
    }

    /// Create a node, taking the parent from the open context when none is given.
    pub fn create_in(
        &mut self,
        data: impl Into<NodeData>,
        parent: Option<NodeId>,
        contexts: &ContextStack,
    ) -> TreeResult<NodeId> {
        self.create(data, parent.or_else(|| contexts.current()))
    }

    fn insert(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new((self.slots.len() - 1) as u32, 0)
            }
        }
    }

    /// Check that `parent` is live and accepts a child of kind `child`
    pub(crate) fn check_attach(&self, parent: NodeId, child: NodeKind) -> TreeResult<()> {
        let parent_kind = self
            .get(parent)
            .ok_or_else(|| TreeError::InvalidParent {
                child,
                reason: format!("parent {parent} is not a live node"),
            })?
            .kind();

        match parent_kind.policy() {
            None => Err(TreeError::InvalidParent {
                child,
                reason: format!("{parent_kind} is a leaf and accepts no children"),
            }),
            Some(policy) if !policy.allows(child) => Err(TreeError::InvalidParent {
                child,
                reason: format!(
                    "{parent_kind} ({}) does not accept {child} children",
                    policy.name()
                ),
            }),
            Some(_) => Ok(()),
        }
    }

    // ========================================================================
    // Structural changes
    // ========================================================================

    /// Move `node` and its whole subtree under `new_parent`, or detach it when `None`.
    ///
    /// Validation happens before any link changes: on error the tree is unchanged. A target
    /// inside the moved subtree is reported as a cycle even when its kind would also be rejected.
    pub fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> TreeResult<()> {
        let kind = self.node(node)?.kind();

        if let Some(parent) = new_parent {
            if parent == node || self.is_ancestor(node, parent) {
                return Err(TreeError::CycleDetected {
                    node,
                    new_parent: parent,
                });
            }
            self.check_attach(parent, kind)?;
        }

        self.unlink(node);
        if let Some(parent) = new_parent {
            self.link(node, parent);
        }
        debug!(%node, new_parent = ?new_parent.map(|p| p.to_string()), "reparented node");
        Ok(())
    }

    /// Detach `target` if it lies anywhere below `ancestor`.
    ///
    /// Returns whether `target` was found below `ancestor`. The detached subtree stays in the
    /// arena as a root of its own until pruned.
    pub fn remove(&mut self, ancestor: NodeId, target: NodeId) -> TreeResult<bool> {
        self.node(ancestor)?;
        self.node(target)?;
        if !self.is_ancestor(ancestor, target) {
            return Ok(false);
        }
        self.unlink(target);
        debug!(%ancestor, %target, "removed node");
        Ok(true)
    }

    /// Detach `node` and free it and its whole subtree. Returns the number of freed nodes.
    pub fn prune(&mut self, node: NodeId) -> TreeResult<usize> {
        self.node(node)?;
        self.unlink(node);
        let doomed = self.descendants(node);
        for id in &doomed {
            let slot = &mut self.slots[id.index()];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
        }
        debug!(%node, freed = doomed.len(), "pruned subtree");
        Ok(doomed.len())
    }

    /// Edit a node's payload in place.
    ///
    /// The edit is applied to a copy and committed only if the kind is unchanged and the new
    /// payload validates.
    pub fn update(&mut self, id: NodeId, edit: impl FnOnce(&mut NodeData)) -> TreeResult<()> {
        let node = self.get_mut(id).ok_or(TreeError::UnknownNode(id))?;
        let kind = node.kind();
        let mut data = node.data.clone();
        edit(&mut data);

        if data.kind() != kind {
            return Err(TreeError::InvalidAttributes {
                kind,
                message: format!("an update cannot turn a {kind} into a {}", data.kind()),
            });
        }
        data.validate()
            .map_err(|message| TreeError::InvalidAttributes { kind, message })?;
        node.data = data;
        Ok(())
    }

    /// Retitle a report or section. Returns false for kinds without a title.
    pub fn set_title(
        &mut self,
        id: NodeId,
        title: impl Into<String>,
        title_style: Option<&str>,
    ) -> TreeResult<bool> {
        let mut changed = false;
        self.update(id, |data| changed = data.set_title(title, title_style))?;
        Ok(changed)
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.get_mut(node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            parent.children.retain(|child| *child != node);
        }
    }

    fn link(&mut self, node: NodeId, parent: NodeId) {
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(node);
        }
        if let Some(child) = self.get_mut(node) {
            child.parent = Some(parent);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// 0 for a root, otherwise one more than the parent's depth
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self[id].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self[parent].parent;
        }
        depth
    }

    /// The node itself, then its parent, up to and including `until` or the root
    pub fn ancestors(&self, id: NodeId, until: Option<NodeId>) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = id;
        while Some(current) != until {
            match self[current].parent {
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        chain
    }

    /// The topmost ancestor, stopping early at `until`
    pub fn root(&self, id: NodeId, until: Option<NodeId>) -> NodeId {
        self.ancestors(id, until).last().copied().unwrap_or(id)
    }

    /// Whether `ancestor` is a strict ancestor of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.get(node).and_then(Node::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(Node::parent);
        }
        false
    }

    /// Pre-order traversal: the node itself, then each child's descendants in child order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants_where(id, |_| true)
    }

    /// Pre-order traversal following only children for which `relation` holds.
    ///
    /// A child rejected by `relation` is skipped together with everything below it.
    pub fn descendants_where(&self, id: NodeId, relation: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            let node = &self[current];
            for child in node.children.iter().rev() {
                if relation(&self[*child]) {
                    stack.push(*child);
                }
            }
        }
        out
    }

    /// Direct section children, in document order
    pub fn sections(&self, id: NodeId) -> Vec<NodeId> {
        self[id]
            .children
            .iter()
            .copied()
            .filter(|child| self[*child].kind() == NodeKind::Section)
            .collect()
    }

    /// A section whose parent is a section
    pub fn is_subsection(&self, id: NodeId) -> bool {
        let node = &self[id];
        node.kind() == NodeKind::Section
            && node
                .parent
                .is_some_and(|parent| self[parent].kind() == NodeKind::Section)
    }

    /// Dotted section number ("2.1.3"); `None` for anything but a section.
    ///
    /// Each level is the 1-based position among the parent's sections. A parentless section is
    /// number 1.
    pub fn section_number(&self, id: NodeId) -> Option<String> {
        if self.get(id)?.kind() != NodeKind::Section {
            return None;
        }
        let mut parts = Vec::new();
        let mut current = id;
        loop {
            let parent = self[current].parent;
            let number = match parent {
                Some(parent) => self
                    .sections(parent)
                    .iter()
                    .position(|s| *s == current)
                    .map_or(1, |i| i + 1),
                None => 1,
            };
            parts.push(number.to_string());
            match parent {
                Some(parent) if self[parent].kind() == NodeKind::Section => current = parent,
                _ => break,
            }
        }
        parts.reverse();
        Some(parts.join("."))
    }

    /// Every node of `kind` in the subtree rooted at `id` (including `id`), in document order
    pub fn items(&self, id: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self[*n].kind() == kind)
            .collect()
    }

    pub fn has_kind(&self, id: NodeId, kind: NodeKind) -> bool {
        self.descendants(id).iter().any(|n| self[*n].kind() == kind)
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    /// Panics when `id` is not live; use [`Tree::get`] for a checked lookup.
    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
            .unwrap_or_else(|| panic!("node {id} is not part of this tree"))
    }
}
