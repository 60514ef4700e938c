//! Tree to record

use super::contract::TypeContract;
use super::error::{PersistError, PersistResult};
use super::record::{Record, RecordPath};
use crate::tree::{NodeId, Tree};
use tracing::trace;

/// Serialize the subtree rooted at `node` into a nested [`Record`].
///
/// Only attributes listed in the kind's [`TypeContract`] are written.
pub fn serialize(tree: &Tree, node: NodeId) -> PersistResult<Record> {
    tree.node(node).map_err(|source| PersistError::Tree {
        source,
        path: RecordPath::default(),
    })?;
    serialize_node(tree, node)
}

fn serialize_node(tree: &Tree, id: NodeId) -> PersistResult<Record> {
    let node = &tree[id];
    let kind = node.kind();
    let contract = TypeContract::of(kind);

    let mut fields = node.data().to_fields()?;
    fields.retain(|name, _| contract.persists(name));
    trace!(node = %id, %kind, fields = fields.len(), "serialized node");

    let children = node
        .children()
        .iter()
        .map(|child| serialize_node(tree, *child))
        .collect::<PersistResult<Vec<_>>>()?;

    Ok(Record {
        node_type: kind.tag().to_string(),
        fields,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::elements::{Report, Section, Text};

    #[test]
    fn test_serialize_nested() {
        let mut tree = Tree::new();
        let report = tree.create(Report::new("R"), None).unwrap();
        let section = tree.create(Section::new("S"), Some(report)).unwrap();
        tree.create(Text::new("hello"), Some(section)).unwrap();

        let record = serialize(&tree, report).unwrap();
        assert_eq!(record.node_type, "Report");
        assert_eq!(record.fields["title"], "R");
        assert_eq!(record.children.len(), 1);
        assert_eq!(record.children[0].children[0].fields["text"], "hello");
        assert_eq!(record.count(), 3);
        assert!(!record.fields.contains_key("parent"));
    }

    #[test]
    fn test_serialize_subtree_only() {
        let mut tree = Tree::new();
        let report = tree.create(Report::new("R"), None).unwrap();
        let section = tree.create(Section::new("S"), Some(report)).unwrap();
        let record = serialize(&tree, section).unwrap();
        assert_eq!(record.node_type, "Section");
        assert!(record.children.is_empty());
    }
}
