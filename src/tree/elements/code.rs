//! Code element: a syntax-highlighted listing.
//!
//! With `fold_code` set (the default) the builder wraps each new code block in its own fold, so
//! long listings start collapsed. The flag is kept on the node so a reloaded tree remembers how it
//! was built, but reloading never adds a second fold: the stored shape already contains it.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Code {
    pub code_text: String,
    pub linenums: Option<u32>,
    pub end: String,
    pub fold_code: bool,
}

impl Default for Code {
    fn default() -> Self {
        Self {
            code_text: String::new(),
            linenums: None,
            end: " ".to_string(),
            fold_code: true,
        }
    }
}

impl Code {
    pub fn new(code_text: impl Into<String>) -> Self {
        Self {
            code_text: code_text.into(),
            ..Self::default()
        }
    }

    /// Start line numbering at `first`
    pub fn with_linenums(mut self, first: u32) -> Self {
        self.linenums = Some(first);
        self
    }

    pub fn folded(mut self, fold_code: bool) -> Self {
        self.fold_code = fold_code;
        self
    }
}

impl Element for Code {
    const KIND: NodeKind = NodeKind::Code;
}
