//! Rendering report trees to HTML
//!
//! The document emitter owns the page layout and container scaffolding; leaf markup is delegated
//! to a [`LeafRenderer`].

pub mod document;
pub mod error;
pub mod leaf;

pub use document::{render_document, HtmlOptions};
pub use error::RenderError;
pub use leaf::{escape, BasicLeafRenderer, LeafRenderer};
