//! The exchange record and record paths

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One node of a persisted tree.
///
/// Serializes as a single mapping: `type`, then the attribute fields in sorted order, then
/// `children`. Equal trees therefore produce byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub children: Vec<Record>,
}

impl Record {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            fields: Map::new(),
            children: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Record) -> Self {
        self.children.push(child);
        self
    }

    /// Number of records in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Record::count).sum::<usize>()
    }

    /// Nesting depth of the deepest descendant: 0 for a record without children
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((record, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(record.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

/// Where a record sits in the document: `Report > Section[0] > Text[2]`.
///
/// The first segment is the top record's type; every later one is the child's type and its
/// position among its siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPath {
    segments: Vec<String>,
}

impl RecordPath {
    pub fn root(node_type: &str) -> Self {
        Self {
            segments: vec![node_type.to_string()],
        }
    }

    pub fn child(&self, node_type: &str, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("{node_type}[{index}]"));
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<top>");
        }
        f.write_str(&self.segments.join(" > "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_is_type_attrs_children() {
        let record = Record::new("Section")
            .with_field("title", "S")
            .with_field("title_style", "")
            .with_child(Record::new("Text").with_field("text", "t"));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Section","title":"S","title_style":"","children":[{"type":"Text","text":"t","children":[]}]}"#
        );
    }

    #[test]
    fn test_children_default_to_empty() {
        let record: Record = serde_json::from_str(r#"{"type":"Text","text":"t"}"#).unwrap();
        assert!(record.children.is_empty());
        assert_eq!(record.fields["text"], "t");
        assert_eq!(record.count(), 1);
    }

    #[test]
    fn test_depth_follows_the_deepest_branch() {
        assert_eq!(Record::new("Text").depth(), 0);
        let record = Record::new("Report")
            .with_child(Record::new("Text"))
            .with_child(Record::new("Section").with_child(Record::new("Section").with_child(Record::new("Text"))))
            .with_child(Record::new("Section"));
        assert_eq!(record.depth(), 3);
    }

    #[test]
    fn test_path_display() {
        let path = RecordPath::root("Report").child("Section", 0).child("Text", 2);
        assert_eq!(path.to_string(), "Report > Section[0] > Text[2]");
    }
}
