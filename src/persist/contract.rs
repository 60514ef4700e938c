//! Per-kind persistence contract
//!
//! For every node kind: the fields a record must carry to rebuild the node, and the full list of
//! attributes written when the node is saved. Required fields are always a subset of the
//! persisted ones. The parent is never part of either list.

use crate::tree::NodeKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeContract {
    pub kind: NodeKind,
    pub required_init_fields: &'static [&'static str],
    pub persisted_attrs: &'static [&'static str],
}

static BY_TAG: Lazy<HashMap<&'static str, TypeContract>> = Lazy::new(|| {
    NodeKind::ALL
        .into_iter()
        .map(|kind| (kind.tag(), TypeContract::of(kind)))
        .collect()
});

impl TypeContract {
    pub fn of(kind: NodeKind) -> TypeContract {
        let (required_init_fields, persisted_attrs): (&[&str], &[&str]) = match kind {
            NodeKind::Report => (&["title"], &["title", "title_style", "meta", "pretext"]),
            NodeKind::Section => (&["title"], &["title", "title_style", "has_tex"]),
            NodeKind::Tab => (
                &["tab_titles"],
                &[
                    "tab_titles",
                    "tab_style",
                    "button_styles",
                    "content_styles",
                    "end",
                ],
            ),
            NodeKind::Fold => (
                &[],
                &["collapsible_style", "button_style", "content_style", "end"],
            ),
            NodeKind::Grid => (
                &["ncols"],
                &[
                    "ncols",
                    "nrows",
                    "item_titles",
                    "grid_style",
                    "grid_item_styles",
                    "end",
                    "font_size",
                    "font_weight",
                ],
            ),
            NodeKind::Text => (
                &["text"],
                &["text", "font_size", "alignment", "end", "style", "formatted"],
            ),
            NodeKind::Quote => (&["text"], &["text", "font_size", "alignment", "end"]),
            NodeKind::Code => (&["code_text"], &["code_text", "linenums", "end", "fold_code"]),
            NodeKind::Link => (&["link"], &["link", "link_title", "link_style", "end"]),
            NodeKind::Image => (
                &["source"],
                &[
                    "source", "width", "height", "title", "scale", "embed", "style", "end",
                ],
            ),
            NodeKind::Plot => (
                &["source"],
                &[
                    "source",
                    "width",
                    "height",
                    "xscale",
                    "yscale",
                    "end",
                    "change_id",
                ],
            ),
            NodeKind::Map => (
                &["source"],
                &["source", "width", "height", "xscale", "yscale", "end"],
            ),
            NodeKind::Table => (
                &["columns", "rows"],
                &[
                    "columns",
                    "rows",
                    "background_colors",
                    "header_style",
                    "row_style",
                    "cell_colors",
                ],
            ),
            NodeKind::Pdf => (&["path"], &["path", "width", "height", "end", "style"]),
        };
        TypeContract {
            kind,
            required_init_fields,
            persisted_attrs,
        }
    }

    /// Contract for a record's `type` tag
    pub fn lookup(tag: &str) -> Option<&'static TypeContract> {
        BY_TAG.get(tag)
    }

    pub fn persists(&self, field: &str) -> bool {
        self.persisted_attrs.contains(&field)
    }

    pub fn requires(&self, field: &str) -> bool {
        self.required_init_fields.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeData;
    use serde_json::Map;
    use std::collections::BTreeSet;

    #[test]
    fn test_persisted_attrs_cover_every_payload_field() {
        for kind in NodeKind::ALL {
            let contract = TypeContract::of(kind);
            let data = NodeData::from_fields(kind, Map::new()).unwrap();
            let fields: BTreeSet<String> = data.to_fields().unwrap().keys().cloned().collect();
            let persisted: BTreeSet<String> = contract
                .persisted_attrs
                .iter()
                .map(|f| f.to_string())
                .collect();
            assert_eq!(fields, persisted, "{kind}");
        }
    }

    #[test]
    fn test_required_fields_are_persisted() {
        for kind in NodeKind::ALL {
            let contract = TypeContract::of(kind);
            for field in contract.required_init_fields {
                assert!(contract.persists(field), "{kind}.{field}");
            }
        }
    }

    #[test]
    fn test_lookup_by_tag() {
        assert_eq!(
            TypeContract::lookup("Table").map(|c| c.required_init_fields),
            Some(&["columns", "rows"][..])
        );
        assert!(TypeContract::lookup("reports.objects.Text").is_none());
    }
}
