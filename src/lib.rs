//! # report-tree
//!
//! Typed document trees for building reports.
//!
//! A report is a tree of nodes: a [`Report`](tree::elements::Report) root, numbered
//! [`Section`](tree::elements::Section)s, layout containers (tabs, folds, grids) and leaf content
//! (text, code, links, images, plots, maps, tables, PDFs). The crate covers the life of such a
//! tree:
//!
//! - [`tree`]: the arena, node kinds and their nesting rules, reparenting and structural queries
//! - [`context`]: scoped construction, where new nodes go under the innermost open container
//! - [`persist`]: the exchange record (JSON or YAML) and lossless reconstruction from it
//! - [`formats`]: the indented outline view and a registry of text formats
//! - [`render`]: HTML emission, with leaf markup behind a pluggable renderer
//! - [`config`]: layered TOML configuration
//!
//! ## Example
//!
//!     use report_tree::context::Builder;
//!     use report_tree::tree::elements::{Report, Section, Text};
//!
//!     let mut builder = Builder::new();
//!     let mut report = builder.open(Report::new("Weekly"))?;
//!     let mut section = report.open(Section::new("Results"))?;
//!     section.add(Text::new("All green."))?;

pub mod config;
pub mod context;
pub mod formats;
pub mod persist;
pub mod render;
pub mod tree;

pub use context::{Builder, ContextStack, Scope};
pub use tree::{Node, NodeData, NodeId, NodeKind, Tree, TreeError, TreeResult};
