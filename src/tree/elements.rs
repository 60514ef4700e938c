//! Element payloads
//!
//!     Each node kind carries a typed attribute struct. Containers (report, section, tab, fold,
//!     grid) arrange content; leaves (text, quote, code, link, image, plot, map, table, pdf) hold
//!     it. The structs are plain serde values: everything a node knows about itself besides its
//!     position in the tree lives here, which is what makes the persisted record a faithful copy.
//!
//!     [`NodeData`] is the closed sum over all payloads. It is the only thing a
//!     [`Node`](super::Node) stores besides its links.
//!
//! Construction
//!
//!     Every payload has a `new` taking its required fields, and `with_*` builder methods for the
//!     rest. Defaults match what a freshly constructed element looks like, so a record only needs
//!     the required fields to rebuild a node.

pub mod code;
pub mod fold;
pub mod grid;
pub mod link;
pub mod media;
pub mod report;
pub mod section;
pub mod tab;
pub mod table;
pub mod text;

pub use code::Code;
pub use fold::Fold;
pub use grid::Grid;
pub use link::Link;
pub use media::{Image, Map, Pdf, Plot};
pub use report::Report;
pub use section::Section;
pub use tab::Tab;
pub use table::Table;
pub use text::{Alignment, Quote, Text};

use super::kind::NodeKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map as FieldMap, Value};

/// Common interface for element payloads
pub trait Element: Serialize + DeserializeOwned + Into<NodeData> {
    const KIND: NodeKind;

    /// Label shown next to the type name in outlines
    fn label(&self) -> Option<&str> {
        None
    }

    /// Check the payload's own invariants
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// The payload of a node, one variant per [`NodeKind`]
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Report(Report),
    Section(Section),
    Tab(Tab),
    Fold(Fold),
    Grid(Grid),
    Text(Text),
    Quote(Quote),
    Code(Code),
    Link(Link),
    Image(Image),
    Plot(Plot),
    Map(Map),
    Table(Table),
    Pdf(Pdf),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Report(_) => NodeKind::Report,
            NodeData::Section(_) => NodeKind::Section,
            NodeData::Tab(_) => NodeKind::Tab,
            NodeData::Fold(_) => NodeKind::Fold,
            NodeData::Grid(_) => NodeKind::Grid,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Quote(_) => NodeKind::Quote,
            NodeData::Code(_) => NodeKind::Code,
            NodeData::Link(_) => NodeKind::Link,
            NodeData::Image(_) => NodeKind::Image,
            NodeData::Plot(_) => NodeKind::Plot,
            NodeData::Map(_) => NodeKind::Map,
            NodeData::Table(_) => NodeKind::Table,
            NodeData::Pdf(_) => NodeKind::Pdf,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            NodeData::Report(e) => e.label(),
            NodeData::Section(e) => e.label(),
            NodeData::Tab(e) => e.label(),
            NodeData::Fold(e) => e.label(),
            NodeData::Grid(e) => e.label(),
            NodeData::Text(e) => e.label(),
            NodeData::Quote(e) => e.label(),
            NodeData::Code(e) => e.label(),
            NodeData::Link(e) => e.label(),
            NodeData::Image(e) => e.label(),
            NodeData::Plot(e) => e.label(),
            NodeData::Map(e) => e.label(),
            NodeData::Table(e) => e.label(),
            NodeData::Pdf(e) => e.label(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            NodeData::Report(e) => e.validate(),
            NodeData::Section(e) => e.validate(),
            NodeData::Tab(e) => e.validate(),
            NodeData::Fold(e) => e.validate(),
            NodeData::Grid(e) => e.validate(),
            NodeData::Text(e) => e.validate(),
            NodeData::Quote(e) => e.validate(),
            NodeData::Code(e) => e.validate(),
            NodeData::Link(e) => e.validate(),
            NodeData::Image(e) => e.validate(),
            NodeData::Plot(e) => e.validate(),
            NodeData::Map(e) => e.validate(),
            NodeData::Table(e) => e.validate(),
            NodeData::Pdf(e) => e.validate(),
        }
    }

    /// The payload as a field map (field name -> plain value)
    pub fn to_fields(&self) -> Result<FieldMap<String, Value>, serde_json::Error> {
        match self {
            NodeData::Report(e) => fields_of(e),
            NodeData::Section(e) => fields_of(e),
            NodeData::Tab(e) => fields_of(e),
            NodeData::Fold(e) => fields_of(e),
            NodeData::Grid(e) => fields_of(e),
            NodeData::Text(e) => fields_of(e),
            NodeData::Quote(e) => fields_of(e),
            NodeData::Code(e) => fields_of(e),
            NodeData::Link(e) => fields_of(e),
            NodeData::Image(e) => fields_of(e),
            NodeData::Plot(e) => fields_of(e),
            NodeData::Map(e) => fields_of(e),
            NodeData::Table(e) => fields_of(e),
            NodeData::Pdf(e) => fields_of(e),
        }
    }

    /// Rebuild a payload of `kind` from a field map. Absent fields take constructor defaults.
    pub fn from_fields(
        kind: NodeKind,
        fields: FieldMap<String, Value>,
    ) -> Result<NodeData, serde_json::Error> {
        let value = Value::Object(fields);
        Ok(match kind {
            NodeKind::Report => NodeData::Report(serde_json::from_value(value)?),
            NodeKind::Section => NodeData::Section(serde_json::from_value(value)?),
            NodeKind::Tab => NodeData::Tab(serde_json::from_value(value)?),
            NodeKind::Fold => NodeData::Fold(serde_json::from_value(value)?),
            NodeKind::Grid => NodeData::Grid(serde_json::from_value(value)?),
            NodeKind::Text => NodeData::Text(serde_json::from_value(value)?),
            NodeKind::Quote => NodeData::Quote(serde_json::from_value(value)?),
            NodeKind::Code => NodeData::Code(serde_json::from_value(value)?),
            NodeKind::Link => NodeData::Link(serde_json::from_value(value)?),
            NodeKind::Image => NodeData::Image(serde_json::from_value(value)?),
            NodeKind::Plot => NodeData::Plot(serde_json::from_value(value)?),
            NodeKind::Map => NodeData::Map(serde_json::from_value(value)?),
            NodeKind::Table => NodeData::Table(serde_json::from_value(value)?),
            NodeKind::Pdf => NodeData::Pdf(serde_json::from_value(value)?),
        })
    }

    /// Change the title of a report or section. Returns false for kinds without a title.
    pub fn set_title(&mut self, title: impl Into<String>, title_style: Option<&str>) -> bool {
        match self {
            NodeData::Report(report) => {
                report.retitle(title, title_style);
                true
            }
            NodeData::Section(section) => {
                section.retitle(title, title_style);
                true
            }
            _ => false,
        }
    }
}

fn fields_of<T: Serialize>(element: &T) -> Result<FieldMap<String, Value>, serde_json::Error> {
    match serde_json::to_value(element)? {
        Value::Object(fields) => Ok(fields),
        _ => Ok(FieldMap::new()),
    }
}

macro_rules! into_node_data {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for NodeData {
                fn from(element: $variant) -> Self {
                    NodeData::$variant(element)
                }
            }
        )*
    };
}

into_node_data!(
    Report, Section, Tab, Fold, Grid, Text, Quote, Code, Link, Image, Plot, Map, Table, Pdf,
);
