//! Link element

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub link: String,
    pub link_title: String,
    pub link_style: String,
    pub end: String,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            link: String::new(),
            link_title: String::new(),
            link_style: String::new(),
            end: "<br><br>".to_string(),
        }
    }
}

impl Link {
    /// A link titled with the last segment of its target
    pub fn new(link: impl Into<String>) -> Self {
        let link = link.into();
        let link_title = basename(&link).to_string();
        Self {
            link,
            link_title,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.link_title = title.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.link_style = style.into();
        self
    }
}

impl Element for Link {
    const KIND: NodeKind = NodeKind::Link;
}

fn basename(link: &str) -> &str {
    link.rsplit(['/', '\\']).next().unwrap_or(link)
}
