//! Text and quote elements
//!
//!     Text is a paragraph block with a font size and alignment. `formatted` keeps the author's
//!     line breaks as-is instead of treating blank lines as paragraph separators.
//!
//!     A quote is text shown in its own cell: the builder wraps every new quote in a fresh 1x1
//!     grid so it gets the cell background.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
        };
        f.write_str(name)
    }
}

pub const DEFAULT_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    pub text: String,
    pub font_size: f64,
    pub alignment: Alignment,
    pub end: String,
    pub style: String,
    pub formatted: bool,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            alignment: Alignment::Left,
            end: String::new(),
            style: String::new(),
            formatted: false,
        }
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn formatted(mut self, formatted: bool) -> Self {
        self.formatted = formatted;
        self
    }
}

impl Element for Text {
    const KIND: NodeKind = NodeKind::Text;

    fn validate(&self) -> Result<(), String> {
        check_font_size(self.font_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    pub text: String,
    pub font_size: f64,
    pub alignment: Alignment,
    pub end: String,
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            alignment: Alignment::Left,
            end: String::new(),
        }
    }
}

impl Quote {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Element for Quote {
    const KIND: NodeKind = NodeKind::Quote;

    fn validate(&self) -> Result<(), String> {
        check_font_size(self.font_size)
    }
}

fn check_font_size(font_size: f64) -> Result<(), String> {
    if font_size.is_finite() && font_size > 0.0 {
        Ok(())
    } else {
        Err(format!("font size should be larger than 0, got {font_size}"))
    }
}
