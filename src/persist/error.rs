//! Error types for persistence

use super::record::RecordPath;
use super::storage::RecordFormat;
use crate::tree::{NodeKind, TreeError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    /// The `type` tag names no known node kind
    #[error("unknown node type '{tag}' at {path}")]
    UnknownType { tag: String, path: RecordPath },

    #[error("{node_type} record at {path} is missing required field '{field}'")]
    MissingField {
        node_type: NodeKind,
        field: &'static str,
        path: RecordPath,
    },

    /// A field is present but has the wrong shape for its attribute
    #[error("field '{field}' of {node_type} at {path} is invalid: {message}")]
    InvalidField {
        node_type: NodeKind,
        field: String,
        message: String,
        path: RecordPath,
    },

    /// The rebuilt node could not be placed (nesting rules, invalid attributes, dead parent)
    #[error("cannot rebuild {path}: {source}")]
    Tree {
        #[source]
        source: TreeError,
        path: RecordPath,
    },

    /// The tree is nested deeper than the target format can read back
    #[error("record is nested {depth} levels deep, but {format} records hold at most {limit}")]
    TooDeep {
        format: RecordFormat,
        depth: usize,
        limit: usize,
    },

        #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// Record path of the failing record, for errors tied to one
    pub fn path(&self) -> Option<&RecordPath> {
        match self {
            PersistError::UnknownType { path, .. }
            | PersistError::MissingField { path, .. }
            | PersistError::InvalidField { path, .. }
            | PersistError::Tree { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type PersistResult<T> = Result<T, PersistError>;
