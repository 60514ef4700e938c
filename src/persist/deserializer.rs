//! Record to tree
//!
//! Reconstruction is all or nothing. Every node created for a record is a descendant of the node
//! created for the top record, so on failure pruning that one node removes everything the call
//! added and the target tree is left as it was.
//!
//! Code and quote records are rebuilt as stored: the fold and grid wrappers the builder adds
//! around them are already part of the saved shape and are not added again.

use super::contract::TypeContract;
use super::error::{PersistError, PersistResult};
use super::record::{Record, RecordPath};
use crate::tree::{NodeData, NodeId, NodeKind, Tree};
use serde_json::Map;
use tracing::{debug, trace, warn};

/// Rebuild the subtree described by `record` under `parent` (or as a root).
pub fn deserialize(
    tree: &mut Tree,
    record: &Record,
    parent: Option<NodeId>,
) -> PersistResult<NodeId> {
    let path = RecordPath::root(&record.node_type);
    let mut top = None;
    match rebuild(tree, record, parent, &path, &mut top) {
        Ok(id) => {
            debug!(node = %id, records = record.count(), "rebuilt tree from record");
            Ok(id)
        }
        Err(err) => {
            if let Some(top) = top {
                // Freshly created and fully owned by this call, so pruning cannot fail.
                let _ = tree.prune(top);
            }
            warn!(error = %err, "aborted tree reconstruction");
            Err(err)
        }
    }
}

/// Rebuild a record into a fresh tree, returning the tree and its root
pub fn load_tree(record: &Record) -> PersistResult<(Tree, NodeId)> {
    let mut tree = Tree::new();
    let root = deserialize(&mut tree, record, None)?;
    Ok((tree, root))
}

fn rebuild(
    tree: &mut Tree,
    record: &Record,
    parent: Option<NodeId>,
    path: &RecordPath,
    top: &mut Option<NodeId>,
) -> PersistResult<NodeId> {
    let contract =
        TypeContract::lookup(&record.node_type).ok_or_else(|| PersistError::UnknownType {
            tag: record.node_type.clone(),
            path: path.clone(),
        })?;
    let data = payload(contract, record, path)?;
    let id = tree
        .create(data, parent)
        .map_err(|source| PersistError::Tree {
            source,
            path: path.clone(),
        })?;
    top.get_or_insert(id);
    trace!(node = %id, %path, "rebuilt node");

    for (index, child) in record.children.iter().enumerate() {
        rebuild(
            tree,
            child,
            Some(id),
            &path.child(&child.node_type, index),
            top,
        )?;
    }
    Ok(id)
}

/// Build the payload: required fields first, then every persisted attribute the record carries.
///
/// Each field is decoded on its own first so a bad value is reported by name.
fn payload(contract: &TypeContract, record: &Record, path: &RecordPath) -> PersistResult<NodeData> {
    let kind = contract.kind;
    for field in contract.required_init_fields {
        if !record.fields.contains_key(*field) {
            return Err(PersistError::MissingField {
                node_type: kind,
                field: *field,
                path: path.clone(),
            });
        }
    }

    let mut fields = Map::new();
    for (name, value) in &record.fields {
        if !contract.persists(name) {
            trace!(%path, field = %name, "ignoring unknown field");
            continue;
        }
        let mut single = Map::new();
        single.insert(name.clone(), value.clone());
        NodeData::from_fields(kind, single).map_err(|err| invalid(kind, name, err, path))?;
        fields.insert(name.clone(), value.clone());
    }

    NodeData::from_fields(kind, fields).map_err(|err| invalid(kind, "<record>", err, path))
}

fn invalid(kind: NodeKind, field: &str, err: serde_json::Error, path: &RecordPath) -> PersistError {
    PersistError::InvalidField {
        node_type: kind,
        field: field.to_string(),
        message: err.to_string(),
        path: path.clone(),
    }
}
