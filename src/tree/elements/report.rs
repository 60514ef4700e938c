//! Report element
//!
//!     The report is the root of a document. It holds the title shown at the top of the page, an
//!     optional pretext rendered before the title (links back to an index, a date line) and the
//!     `<meta>` tag emitted into the page head.
//!
//!     Reports only own container children: sections, tabs, folds and grids. Leaf content goes
//!     inside one of those.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};

pub const DEFAULT_META: &str =
    r#"<meta name="viewport" http-equiv="Content-Type" content="text/html; charset=utf-8">"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub title: String,
    pub title_style: String,
    pub meta: String,
    pub pretext: String,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_style: String::new(),
            meta: DEFAULT_META.to_string(),
            pretext: String::new(),
        }
    }
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_title_style(mut self, style: impl Into<String>) -> Self {
        self.title_style = style.into();
        self
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = meta.into();
        self
    }

    pub fn with_pretext(mut self, pretext: impl Into<String>) -> Self {
        self.pretext = pretext.into();
        self
    }

    /// Replace the title. The style is reset when none is given.
    pub fn retitle(&mut self, title: impl Into<String>, title_style: Option<&str>) {
        self.title = title.into();
        self.title_style = title_style.unwrap_or_default().to_string();
    }
}

impl Element for Report {
    const KIND: NodeKind = NodeKind::Report;

    fn label(&self) -> Option<&str> {
        Some(&self.title)
    }
}
