//! Format registry for report trees
//!
//! Each output format implements [`Formatter`] and is registered by name with [`FormatRegistry`].
//! The CLI and library callers look formats up by that name.

use super::outline::{self, sections_only, OutlineOptions};
use crate::persist::{serialize, RecordFormat};
use crate::tree::{NodeId, Tree};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Turns the subtree at a node into text
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g. "outline", "json")
    fn name(&self) -> &str;

    fn serialize(&self, tree: &Tree, root: NodeId) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

fn live(tree: &Tree, root: NodeId) -> Result<(), FormatError> {
    tree.node(root)
        .map(|_| ())
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

/// Every node, one per line
#[derive(Debug, Clone, Default)]
pub struct OutlineFormatter {
    pub options: OutlineOptions,
}

impl Formatter for OutlineFormatter {
    fn name(&self) -> &str {
        "outline"
    }

    fn serialize(&self, tree: &Tree, root: NodeId) -> Result<String, FormatError> {
        live(tree, root)?;
        Ok(outline::render_with(tree, root, None, &self.options))
    }

    fn description(&self) -> &str {
        "Indented outline of every node"
    }
}

/// Reports and sections only
#[derive(Debug, Clone, Default)]
pub struct SectionsFormatter {
    pub options: OutlineOptions,
}

impl Formatter for SectionsFormatter {
    fn name(&self) -> &str {
        "sections"
    }

    fn serialize(&self, tree: &Tree, root: NodeId) -> Result<String, FormatError> {
        live(tree, root)?;
        Ok(outline::render_with(
            tree,
            root,
            Some(&sections_only),
            &self.options,
        ))
    }

    fn description(&self) -> &str {
        "Indented outline of the section structure"
    }
}

/// The persisted record, as JSON or YAML
#[derive(Debug, Clone, Copy)]
pub struct RecordFormatter {
    pub format: RecordFormat,
    pub pretty: bool,
}

impl Formatter for RecordFormatter {
    fn name(&self) -> &str {
        self.format.extension()
    }

    fn serialize(&self, tree: &Tree, root: NodeId) -> Result<String, FormatError> {
        let record =
            serialize(tree, root).map_err(|e| FormatError::SerializationError(e.to_string()))?;
        self.format
            .to_text(&record, self.pretty)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        match self.format {
            RecordFormat::Json => "Persisted record as JSON",
            RecordFormat::Yaml => "Persisted record as YAML",
        }
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, tree: &Tree, root: NodeId, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(tree, root)
    }

    /// Registered names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with the outline, sections, json and yaml formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(OutlineFormatter::default());
        registry.register(SectionsFormatter::default());
        registry.register(RecordFormatter {
            format: RecordFormat::Json,
            pretty: true,
        });
        registry.register(RecordFormatter {
            format: RecordFormat::Yaml,
            pretty: true,
        });
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
