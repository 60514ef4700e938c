//! Table element
//!
//! A sortable table of plain values. Row background colours and per-cell colours are optional;
//! when present they must line up with the table's shape.

use super::{Element, NodeKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub background_colors: Vec<Option<String>>,
    pub header_style: String,
    pub row_style: String,
    pub cell_colors: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
            ..Self::default()
        }
    }

    pub fn with_background_colors(mut self, colors: Vec<Option<String>>) -> Self {
        self.background_colors = colors;
        self
    }

    pub fn with_cell_colors(mut self, colors: Vec<Vec<Option<String>>>) -> Self {
        self.cell_colors = colors;
        self
    }

    pub fn with_header_style(mut self, style: impl Into<String>) -> Self {
        self.header_style = style.into();
        self
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// A column is numeric when every cell in it is a number
    pub fn is_numeric_column(&self, column: usize) -> bool {
        !self.rows.is_empty()
            && self
                .rows
                .iter()
                .all(|row| row.get(column).is_some_and(Value::is_number))
    }
}

impl Element for Table {
    const KIND: NodeKind = NodeKind::Table;

    fn validate(&self) -> Result<(), String> {
        let (nrows, ncols) = self.shape();
        if let Some(i) = self.rows.iter().position(|row| row.len() != ncols) {
            return Err(format!(
                "row {i} has {} cells but the table has {ncols} columns",
                self.rows[i].len()
            ));
        }
        if !self.background_colors.is_empty() && self.background_colors.len() != nrows {
            return Err(
                "length of background colors should be equal to number of rows of the table"
                    .to_string(),
            );
        }
        if !self.cell_colors.is_empty()
            && (self.cell_colors.len() != nrows
                || self.cell_colors.iter().any(|row| row.len() != ncols))
        {
            return Err("cell_colors must have one entry per cell of the table".to_string());
        }
        Ok(())
    }
}
