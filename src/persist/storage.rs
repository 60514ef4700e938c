//! Reading and writing records
//!
//!     Records are stored as JSON or YAML. The format of a file is taken from its extension
//!     (`.yaml` and `.yml` are YAML, anything else is JSON); explicit-format variants exist for
//!     callers that already know better.
//!
//!     Templates are ordinary saved reports with an empty title: a pretext and a list of empty
//!     sections. [`from_template`] loads one and gives it a title.

use super::deserializer::load_tree;
use super::error::{PersistError, PersistResult};
use super::record::Record;
use super::serializer::serialize;
use crate::context::Builder;
use crate::tree::elements::{Report, Section};
use crate::tree::{NodeId, Tree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const YAML_MAX_DEPTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    #[default]
    Json,
    Yaml,
}

impl RecordFormat {
    /// Format implied by a file extension, JSON when there is none or it is unknown
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                RecordFormat::Yaml
            }
            _ => RecordFormat::Json,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            RecordFormat::Json => "json",
            RecordFormat::Yaml => "yaml",
        }
    }

    /// Deepest tree a record in this format can hold and still be read back.
    ///
    /// JSON is read without a recursion limit. The YAML reader stops at 128 nested collections;
    /// every tree level takes two (the node mapping and its `children` list) and a leaf's own
    /// attributes take up to two more.
    pub fn max_depth(self) -> Option<usize> {
        match self {
            RecordFormat::Json => None,
            RecordFormat::Yaml => Some(YAML_MAX_DEPTH),
        }
    }

    /// Write a record as text. Records deeper than [`RecordFormat::max_depth`] are refused so
    /// nothing is written that cannot be parsed again.
    pub fn to_text(self, record: &Record, pretty: bool) -> PersistResult<String> {
        if let Some(limit) = self.max_depth() {
            let depth = record.depth();
            if depth > limit {
                return Err(PersistError::TooDeep {
                    format: self,
                    depth,
                    limit,
                });
            }
        }
        Ok(match self {
            RecordFormat::Json if pretty => serde_json::to_string_pretty(record)?,
            RecordFormat::Json => serde_json::to_string(record)?,
            RecordFormat::Yaml => serde_yaml::to_string(record)?,
        })
    }

    pub fn parse(self, text: &str) -> PersistResult<Record> {
        Ok(match self {
            RecordFormat::Json => {
                let mut de = serde_json::Deserializer::from_str(text);
                de.disable_recursion_limit();
                let record = Record::deserialize(serde_stacker::Deserializer::new(&mut de))?;
                de.end()?;
                record
            }
            RecordFormat::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for RecordFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(RecordFormat::Json),
            "yaml" | "yml" => Ok(RecordFormat::Yaml),
            other => Err(format!("unknown record format '{other}' (expected json or yaml)")),
        }
    }
}

pub fn read_record(path: &Path) -> PersistResult<Record> {
    let text = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    RecordFormat::from_path(path).parse(&text)
}

pub fn write_record(
    path: &Path,
    record: &Record,
    format: RecordFormat,
    pretty: bool,
) -> PersistResult<()> {
    let text = format.to_text(record, pretty)?;
    fs::write(path, text).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), %format, records = record.count(), "wrote record");
    Ok(())
}

/// Save the subtree at `root`, in the format implied by the path
pub fn save(tree: &Tree, root: NodeId, path: &Path) -> PersistResult<()> {
    let record = serialize(tree, root)?;
    write_record(path, &record, RecordFormat::from_path(path), true)
}

/// Load a saved tree into a fresh arena
pub fn load(path: &Path) -> PersistResult<(Tree, NodeId)> {
    let record = read_record(path)?;
    debug!(path = %path.display(), "loading record");
    load_tree(&record)
}

/// Save an untitled report with a pretext and empty top-level sections.
///
/// A path without an extension gets `.json`. Returns the template tree.
pub fn create_template<S: AsRef<str>>(
    path: &Path,
    pretext: &str,
    section_titles: &[S],
) -> PersistResult<(Tree, NodeId)> {
    let mut builder = Builder::new();
    let report = {
        let mut report = builder
            .open(Report::new("").with_pretext(pretext))
            .map_err(tree_error)?;
        for title in section_titles {
            report.add(Section::new(title.as_ref())).map_err(tree_error)?;
        }
        report.node()
    };
    let tree = builder.into_tree();

    save(&tree, report, &template_path(path))?;
    Ok((tree, report))
}

/// Load a template and give the report its title
pub fn from_template(path: &Path, title: &str) -> PersistResult<(Tree, NodeId)> {
    let (mut tree, root) = load(&template_path(path))?;
    tree.set_title(root, title, None).map_err(tree_error)?;
    Ok((tree, root))
}

/// Where [`create_template`] writes: `path`, with `.json` added when it has no extension
pub fn template_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(RecordFormat::Json.extension())
    }
}

fn tree_error(source: crate::tree::TreeError) -> PersistError {
    PersistError::Tree {
        source,
        path: Default::default(),
    }
}
