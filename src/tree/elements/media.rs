//! Embedded media: images, plots, maps and PDFs
//!
//!     All four reference an external file by path. Loading and embedding that file is the job of
//!     a [`LeafRenderer`](crate::render::LeafRenderer); the tree only records where it is and how
//!     it should be sized.
//!
//!     - Image: a picture, optionally embedded as base64 instead of linked.
//!     - Plot: an interactive plot exported as a standalone HTML page.
//!     - Map: an antigenic cartography map exported as a standalone HTML page.
//!     - Pdf: a PDF document shown inline.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub source: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub title: String,
    pub scale: f64,
    pub embed: bool,
    pub style: String,
    pub end: String,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            source: String::new(),
            width: None,
            height: None,
            title: String::new(),
            scale: 1.0,
            embed: true,
            style: String::new(),
            end: "<br>".to_string(),
        }
    }
}

impl Image {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn embedded(mut self, embed: bool) -> Self {
        self.embed = embed;
        self
    }

    /// Width after scaling, if known
    pub fn scaled_width(&self) -> Option<f64> {
        self.width.map(|w| w * self.scale)
    }

    pub fn scaled_height(&self) -> Option<f64> {
        self.height.map(|h| h * self.scale)
    }
}

impl Element for Image {
    const KIND: NodeKind = NodeKind::Image;

    fn validate(&self) -> Result<(), String> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = value {
                if v <= 0.0 {
                    return Err(format!("{name} should be positive but is {v}"));
                }
            }
        }
        if self.scale <= 0.0 {
            return Err(format!("scale should be positive but is {}", self.scale));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plot {
    pub source: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub xscale: f64,
    pub yscale: f64,
    pub end: String,
    /// Give the plot a fresh element id, needed when the same plot appears twice in a page
    pub change_id: bool,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            source: String::new(),
            width: None,
            height: None,
            xscale: 1.0,
            yscale: 1.0,
            end: "<br>".to_string(),
            change_id: false,
        }
    }
}

impl Plot {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_new_id(mut self) -> Self {
        self.change_id = true;
        self
    }
}

impl Element for Plot {
    const KIND: NodeKind = NodeKind::Plot;

    fn validate(&self) -> Result<(), String> {
        check_scales(self.xscale, self.yscale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Map {
    pub source: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub xscale: f64,
    pub yscale: f64,
    pub end: String,
}

impl Default for Map {
    fn default() -> Self {
        Self {
            source: String::new(),
            width: None,
            height: None,
            xscale: 1.0,
            yscale: 1.0,
            end: "<br>".to_string(),
        }
    }
}

impl Map {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, xscale: f64, yscale: f64) -> Self {
        self.xscale = xscale;
        self.yscale = yscale;
        self
    }
}

impl Element for Map {
    const KIND: NodeKind = NodeKind::Map;

    fn validate(&self) -> Result<(), String> {
        check_scales(self.xscale, self.yscale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pdf {
    pub path: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub end: String,
    pub style: String,
}

impl Default for Pdf {
    fn default() -> Self {
        Self {
            path: String::new(),
            width: None,
            height: None,
            end: "<br>".to_string(),
            style: String::new(),
        }
    }
}

impl Pdf {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

impl Element for Pdf {
    const KIND: NodeKind = NodeKind::Pdf;
}

fn check_scales(xscale: f64, yscale: f64) -> Result<(), String> {
    if xscale > 0.0 && yscale > 0.0 {
        Ok(())
    } else {
        Err(format!("scales should be positive, got {xscale} and {yscale}"))
    }
}
