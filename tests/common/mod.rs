//! Shared fixtures: the nested report used across scenarios, and a random tree strategy.

#![allow(dead_code)]

use proptest::prelude::*;
use report_tree::tree::elements::{Code, Fold, Grid, Link, Report, Section, Tab, Table, Text};
use report_tree::{Builder, NodeData, NodeId, Tree};
use serde_json::json;

/// Handles into [`nested_report`]
pub struct Nested {
    pub tree: Tree,
    pub report: NodeId,
    pub section1: NodeId,
    pub section2: NodeId,
    pub subsection2: NodeId,
}

/// Test1 > (Section1 > Subsection1..3, Section1 > Subsection4), a text in every subsection
pub fn nested_report() -> Nested {
    let mut builder = Builder::new();
    let mut handles = Vec::new();
    let report = {
        let mut report = builder.open(Report::new("Test1")).unwrap();
        {
            let mut section = report.open(Section::new("Section1")).unwrap();
            handles.push(section.node());
            for title in ["Subsection1", "Subsection2", "Subsection3"] {
                let mut sub = section.open(Section::new(title)).unwrap();
                handles.push(sub.node());
                sub.add(Text::new("Lorem Ipsum")).unwrap();
            }
        }
        {
            let mut section = report.open(Section::new("Section1")).unwrap();
            handles.push(section.node());
            let mut sub = section.open(Section::new("Subsection4")).unwrap();
            sub.add(Text::new("Lorem Ipsum")).unwrap();
        }
        report.node()
    };
    Nested {
        tree: builder.into_tree(),
        report,
        section1: handles[0],
        subsection2: handles[2],
        section2: handles[4],
    }
}

fn title() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,8}( [a-z]{1,6}){0,2}"
}

/// A random payload of any non-report kind
pub fn payload() -> impl Strategy<Value = NodeData> {
    prop_oneof![
        title().prop_map(|t| NodeData::from(Section::new(t))),
        prop::collection::vec(title(), 1..4).prop_map(|ts| NodeData::from(Tab::new(ts))),
        Just(NodeData::from(Fold::new())),
        (1u32..4, 1u32..3).prop_map(|(c, r)| NodeData::from(Grid::new(c).with_rows(r))),
        (title(), 8u32..40)
            .prop_map(|(t, size)| NodeData::from(Text::new(t).with_font_size(f64::from(size)))),
        (title(), 1u32..20).prop_map(|(t, first)| NodeData::from(Code::new(t).with_linenums(first))),
        title().prop_map(|t| NodeData::from(Link::new(format!(
            "https://example.org/{}",
            t.replace(' ', "-")
        )))),
        (0usize..4).prop_map(|n| {
            let rows = (0..n)
                .map(|i| vec![json!(i), json!(format!("row {i}"))])
                .collect();
            NodeData::from(Table::new(["id", "name"], rows))
        }),
    ]
}

/// Attach each payload under the chosen container that accepts it, skipping payloads nothing
/// accepts yet
pub fn build(steps: &[(usize, NodeData)]) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let root = tree.create(Report::new("Root"), None).unwrap();
    let mut containers = vec![root];
    for (choice, data) in steps {
        let kind = data.kind();
        let candidates: Vec<NodeId> = containers
            .iter()
            .copied()
            .filter(|c| tree[*c].kind().accepts_child(kind))
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let parent = candidates[choice % candidates.len()];
        let id = tree.create(data.clone(), Some(parent)).unwrap();
        if kind.is_container() {
            containers.push(id);
        }
    }
    (tree, root)
}

pub fn tree_strategy() -> impl Strategy<Value = (Tree, NodeId)> {
    prop::collection::vec((any::<usize>(), payload()), 0..40).prop_map(|steps| build(&steps))
}
