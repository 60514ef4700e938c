//! Section element
//!
//!     Sections are the numbered structural unit of a report. They nest arbitrarily: a section
//!     whose parent is another section is a subsection, and its number is derived from its
//!     position among its parent's sections ("2.1").
//!
//!     `has_tex` marks sections containing `$$`-delimited formulas so the page head pulls in a
//!     math renderer.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub title: String,
    pub title_style: String,
    pub has_tex: bool,
}

impl Section {
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

    pub fn with_tex(mut self, has_tex: bool) -> Self {
        self.has_tex = has_tex;
        self
    }

    pub fn retitle(&mut self, title: impl Into<String>, title_style: Option<&str>) {
        self.title = title.into();
        self.title_style = title_style.unwrap_or_default().to_string();
    }
}

impl Element for Section {
    const KIND: NodeKind = NodeKind::Section;

    fn label(&self) -> Option<&str> {
        Some(&self.title)
    }
}
