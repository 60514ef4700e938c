//! Persistence: report trees to flat records and back
//!
//!     A [`Record`] is the exchange form of a subtree: a `type` tag naming the node kind, the
//!     node's persisted attributes as plain values, and its children as nested records. Parent
//!     links are implied by nesting and never stored.
//!
//!     Which attributes are written and which must be present to rebuild a node is fixed per kind
//!     by the [`TypeContract`] table. The serializer and deserializer are driven by that table, so
//!     adding an attribute to a payload means adding it to the table as well (a test checks the
//!     two agree).
//!
//!     Records are written as JSON (the default) or YAML; see [`storage`].
//!
//!         {
//!           "type": "Report",
//!           "meta": "...",
//!           "pretext": "",
//!           "title": "Weekly",
//!           "title_style": "",
//!           "children": [
//!             { "type": "Section", "has_tex": false, "title": "Results", "title_style": "", "children": [] }
//!           ]
//!         }

pub mod contract;
pub mod deserializer;
pub mod error;
pub mod record;
pub mod serializer;
pub mod storage;

pub use contract::TypeContract;
pub use deserializer::{deserialize, load_tree};
pub use error::{PersistError, PersistResult};
pub use record::{Record, RecordPath};
pub use serializer::serialize;
pub use storage::RecordFormat;
