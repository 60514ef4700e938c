//! Text output formats for report trees
//!
//! - `outline` / `sections`: the indented connector outline, full or sections only
//! - `json` / `yaml`: the persisted record

pub mod outline;
pub mod registry;

pub use outline::{render, render_with, sections_only, OutlineOptions, OutlineStyle};
pub use registry::{FormatError, FormatRegistry, Formatter};
