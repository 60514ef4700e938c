//! Scoped construction
//!
//!     Report code reads top-down: open a section, add a few paragraphs, open a tab inside it,
//!     add a plot, close the tab, close the section. The [`Builder`] supports exactly that shape.
//!     It owns a [`Tree`] and a [`ContextStack`] of open containers; a node added without an
//!     explicit parent goes under the innermost open container.
//!
//!     Containers are opened through [`Builder::open`] or [`Builder::enter`], which return a
//!     [`Scope`] guard. The guard derefs to the builder, so nested content is added through it,
//!     and dropping it closes the container. The stack is therefore balanced on every exit path:
//!     normal block end, `?` early returns and unwinding panics alike.
//!
//!         let mut builder = Builder::new();
//!         let mut report = builder.open(Report::new("Weekly"))?;
//!         {
//!             let mut section = report.open(Section::new("Results"))?;
//!             section.add(Text::new("All green."))?;
//!         }
//!         report.add(Fold::new())?;
//!
//!     A stack belongs to one builder. Two builds running at the same time each own their builder
//!     and never see each other's contexts.

use crate::tree::elements::{Code, Fold, Grid, Quote};
use crate::tree::{NodeData, NodeId, Tree, TreeError, TreeResult};
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// Stack of currently open container nodes, innermost last
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    open: Vec<NodeId>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The innermost open container, if any
    pub fn current(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Open containers from outermost to innermost
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.open.iter().copied()
    }

    fn push(&mut self, node: NodeId) {
        self.open.push(node);
        trace!(%node, depth = self.open.len(), "entered context");
    }

    fn pop(&mut self) -> Option<NodeId> {
        let node = self.open.pop();
        if let Some(node) = node {
            trace!(%node, depth = self.open.len(), "left context");
        }
        node
    }
}

/// Builds one report tree, tracking which containers are open
#[derive(Debug, Default)]
pub struct Builder {
    tree: Tree,
    contexts: ContextStack,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue building on an existing tree
    pub fn from_tree(tree: Tree) -> Self {
        Self {
            tree,
            contexts: ContextStack::new(),
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Direct access for structural edits (reparenting, pruning) in the middle of a build
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    pub fn contexts(&self) -> &ContextStack {
        &self.contexts
    }

    /// Add a node under the innermost open container.
    ///
    /// With nothing open, only reports and sections can be added; they become roots.
    pub fn add(&mut self, data: impl Into<NodeData>) -> TreeResult<NodeId> {
        self.tree.create_in(data, None, &self.contexts)
    }

    /// Add a node under an explicit parent, ignoring the open containers
    pub fn add_to(&mut self, data: impl Into<NodeData>, parent: NodeId) -> TreeResult<NodeId> {
        self.tree.create(data, Some(parent))
    }

    /// Make an existing container the innermost context until the returned guard drops
    pub fn enter(&mut self, node: NodeId) -> TreeResult<Scope<'_>> {
        let kind = self.tree.node(node)?.kind();
        if !kind.is_container() {
            return Err(TreeError::InvalidParent {
                child: kind,
                reason: format!("cannot open {kind} {node} as a context: it is a leaf"),
            });
        }
        self.contexts.push(node);
        Ok(Scope {
            builder: self,
            node,
        })
    }

    /// Add a container and open it, the way `with Section(...)` reads in report scripts
    pub fn open(&mut self, data: impl Into<NodeData>) -> TreeResult<Scope<'_>> {
        let data = data.into();
        let kind = data.kind();
        if !kind.is_container() {
            return Err(TreeError::InvalidParent {
                child: kind,
                reason: format!("{kind} is a leaf and cannot be opened as a context"),
            });
        }
        let node = self.add(data)?;
        self.enter(node)
    }

    /// Add a code block, wrapped in its own fold when `fold_code` is set.
    ///
    /// Returns the code node.
    pub fn code(&mut self, code: Code) -> TreeResult<NodeId> {
        if code.fold_code {
            self.wrapped(Fold::new(), code)
        } else {
            self.add(code)
        }
    }

    /// Add a quote wrapped in a single-cell grid. Returns the quote node.
    pub fn quote(&mut self, quote: Quote) -> TreeResult<NodeId> {
        self.wrapped(Grid::new(1), quote)
    }

    /// Add `wrapper` under the current context and `inner` inside it. On failure neither is
    /// left in the tree.
    fn wrapped(
        &mut self,
        wrapper: impl Into<NodeData>,
        inner: impl Into<NodeData>,
    ) -> TreeResult<NodeId> {
        let inner = inner.into();
        let kind = inner.kind();
        inner
            .validate()
            .map_err(|message| TreeError::InvalidAttributes { kind, message })?;

        let wrapper = self.add(wrapper)?;
        self.tree.create(inner, Some(wrapper)).map_err(|err| {
            // Freshly created and childless, so pruning cannot fail.
            let _ = self.tree.prune(wrapper);
            err
        })
    }
}

/// An open context. Derefs to the [`Builder`]; dropping it closes the container.
#[derive(Debug)]
pub struct Scope<'a> {
    builder: &'a mut Builder,
    node: NodeId,
}

impl Scope<'_> {
    /// The container this scope opened
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Deref for Scope<'_> {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        self.builder
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Builder {
        self.builder
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        let popped = self.builder.contexts.pop();
        debug_assert_eq!(popped, Some(self.node), "contexts closed out of order");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::elements::{Report, Section, Tab, Text};
    use crate::tree::NodeKind;

    #[test]
    fn test_add_goes_to_innermost_context() {
        let mut builder = Builder::new();
        let mut report = builder.open(Report::new("R")).unwrap();
        let root = report.node();
        let mut section = report.open(Section::new("S")).unwrap();
        let s = section.node();
        let text = section.add(Text::new("hello")).unwrap();
        drop(section);
        drop(report);

        let tree = builder.tree();
        assert_eq!(tree[text].parent(), Some(s));
        assert_eq!(tree[s].parent(), Some(root));
        assert!(builder.contexts().is_empty());
    }

    #[test]
    fn test_stack_unwinds_on_error() {
        fn build(builder: &mut Builder) -> TreeResult<()> {
            let mut report = builder.open(Report::new("R"))?;
            // Reports take no leaves, so this fails while the report is open.
            report.add(Text::new("stray"))?;
            Ok(())
        }

        let mut builder = Builder::new();
        assert!(matches!(
            build(&mut builder),
            Err(TreeError::InvalidParent { .. })
        ));
        assert!(builder.contexts().is_empty());
    }

    #[test]
    fn test_stack_unwinds_on_panic() {
        let mut builder = Builder::new();
        let report = builder.add(Report::new("R")).unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = builder.enter(report).unwrap();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert!(builder.contexts().is_empty());
    }

    #[test]
    fn test_leaf_cannot_be_entered() {
        let mut builder = Builder::new();
        let section = builder.add(Section::new("S")).unwrap();
        let text = builder.add_to(Text::new("t"), section).unwrap();
        assert!(matches!(
            builder.enter(text),
            Err(TreeError::InvalidParent { .. })
        ));
        assert!(builder.open(Text::new("x")).is_err());
        assert!(builder.contexts().is_empty());
        assert_eq!(builder.tree().len(), 2);
    }

    #[test]
    fn test_code_is_folded() {
        let mut builder = Builder::new();
        let mut section = builder.open(Section::new("S")).unwrap();
        let folded = section.code(Code::new("x = 1")).unwrap();
        let plain = section.code(Code::new("y = 2").folded(false)).unwrap();
        let s = section.node();
        drop(section);

        let tree = builder.tree();
        let fold = tree[folded].parent().unwrap();
        assert_eq!(tree[fold].kind(), NodeKind::Fold);
        assert_eq!(tree[fold].parent(), Some(s));
        assert_eq!(tree[plain].parent(), Some(s));
    }

    #[test]
    fn test_quote_is_gridded() {
        let mut builder = Builder::new();
        let mut section = builder.open(Section::new("S")).unwrap();
        let mut tab = section.open(Tab::new(["only"])).unwrap();
        let quote = tab.quote(Quote::new("to be")).unwrap();
        let t = tab.node();
        drop(tab);
        drop(section);

        let tree = builder.tree();
        let grid = tree[quote].parent().unwrap();
        assert_eq!(tree[grid].kind(), NodeKind::Grid);
        assert_eq!(tree[grid].parent(), Some(t));
    }

    #[test]
    fn test_invalid_quote_leaves_no_grid() {
        let mut builder = Builder::new();
        let mut section = builder.open(Section::new("S")).unwrap();
        let mut quote = Quote::new("to be");
        quote.font_size = -1.0;

        assert!(matches!(
            section.quote(quote),
            Err(TreeError::InvalidAttributes {
                kind: NodeKind::Quote,
                ..
            })
        ));
        let s = section.node();
        assert!(section.tree()[s].children().is_empty());
        assert_eq!(section.tree().len(), 1);
    }

    #[test]
    fn test_wrapped_leaf_needs_a_context() {
        let mut builder = Builder::new();
        assert_eq!(
            builder.quote(Quote::new("q")),
            Err(TreeError::NoParentAvailable {
                kind: NodeKind::Grid
            })
        );
        assert_eq!(
            builder.code(Code::new("x = 1")),
            Err(TreeError::NoParentAvailable {
                kind: NodeKind::Fold
            })
        );
        assert!(builder.tree().is_empty());
    }
}
