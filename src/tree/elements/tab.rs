//! Tab element: shows each child in its own tab, one button per title.
//!
//! The number of titles must match the number of children by the time the document is rendered;
//! while the tree is being built children are still arriving, so the check happens at emission.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tab {
    pub tab_titles: Vec<String>,
    pub tab_style: Option<String>,
    /// One style per button, or a single style applied to all of them
    pub button_styles: Vec<String>,
    pub content_styles: Vec<String>,
    pub end: String,
}

impl Default for Tab {
    fn default() -> Self {
        Self {
            tab_titles: Vec::new(),
            tab_style: None,
            button_styles: Vec::new(),
            content_styles: Vec::new(),
            end: "<br><br>".to_string(),
        }
    }
}

impl Tab {
    pub fn new<I, S>(tab_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tab_titles: tab_titles.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_tab_style(mut self, style: impl Into<String>) -> Self {
        self.tab_style = Some(style.into());
        self
    }

    pub fn with_button_styles(mut self, styles: Vec<String>) -> Self {
        self.button_styles = styles;
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }

    /// Style of the button at `index`
    pub fn button_style(&self, index: usize) -> &str {
        match self.button_styles.len() {
            0 => "",
            1 => &self.button_styles[0],
            _ => self.button_styles.get(index).map(String::as_str).unwrap_or(""),
        }
    }
}

impl Element for Tab {
    const KIND: NodeKind = NodeKind::Tab;
}
