//! Grid element
//!
//!     A grid lays its children out in `nrows` x `ncols` cells, filled row by row. Optional item
//!     titles are printed above each cell and per-cell styles are appended to the cell's own.
//!
//!     Both lists, when given, must have exactly one entry per cell. A grid may hold fewer
//!     children than cells, never more; that last rule is checked at emission because children
//!     are attached one at a time.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub ncols: u32,
    pub nrows: u32,
    pub item_titles: Option<Vec<String>>,
    pub grid_style: String,
    pub grid_item_styles: Vec<String>,
    pub end: String,
    pub font_size: u32,
    pub font_weight: String,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            ncols: 1,
            nrows: 1,
            item_titles: None,
            grid_style: String::new(),
            grid_item_styles: Vec::new(),
            end: "<br><br>".to_string(),
            font_size: 16,
            font_weight: "bold".to_string(),
        }
    }
}

impl Grid {
    pub fn new(ncols: u32) -> Self {
        Self {
            ncols,
            ..Self::default()
        }
    }

    pub fn with_rows(mut self, nrows: u32) -> Self {
        self.nrows = nrows;
        self
    }

    pub fn with_item_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_titles = Some(titles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_grid_style(mut self, style: impl Into<String>) -> Self {
        self.grid_style = style.into();
        self
    }

    pub fn with_item_styles(mut self, styles: Vec<String>) -> Self {
        self.grid_item_styles = styles;
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }

    /// Number of cells
    pub fn capacity(&self) -> usize {
        self.ncols as usize * self.nrows as usize
    }

    pub fn item_style(&self, index: usize) -> &str {
        self.grid_item_styles
            .get(index)
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Element for Grid {
    const KIND: NodeKind = NodeKind::Grid;

    fn validate(&self) -> Result<(), String> {
        if self.ncols == 0 || self.nrows == 0 {
            return Err(format!(
                "a grid needs at least one row and one column, got {}x{}",
                self.nrows, self.ncols
            ));
        }
        let cells = self.capacity();
        if let Some(titles) = &self.item_titles {
            if titles.len() != cells {
                return Err(format!(
                    "nrows*ncols is {cells} but {} item titles were supplied",
                    titles.len()
                ));
            }
        }
        if !self.grid_item_styles.is_empty() && self.grid_item_styles.len() != cells {
            return Err(format!(
                "grid_item_styles must have {cells} entries, got {}",
                self.grid_item_styles.len()
            ));
        }
        Ok(())
    }
}
