//! Fold element: content hidden behind a toggle button.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fold {
    pub collapsible_style: String,
    pub button_style: String,
    pub content_style: String,
    pub end: String,
}

impl Default for Fold {
    fn default() -> Self {
        Self {
            collapsible_style: String::new(),
            button_style: String::new(),
            content_style: String::new(),
            end: "<br><br>".to_string(),
        }
    }
}

impl Fold {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_button_style(mut self, style: impl Into<String>) -> Self {
        self.button_style = style.into();
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }
}

impl Element for Fold {
    const KIND: NodeKind = NodeKind::Fold;
}
