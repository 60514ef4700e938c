//! Outline formatter
//!
//! The outline is a one-line-per-node view of a report tree, meant for quick scanning in a
//! terminal, a log, or the table of contents at the top of an HTML report.
//!
//! Format:
//!
//!     REPORT (Weekly)
//!     ├───SECTION (Results)
//!     │   ├───SUBSECTION (Tables)
//!     │   │   └───TABLE
//!     │   └───TEXT
//!     └───SECTION (Appendix)
//!
//! The root is printed flush-left with no connector. Every other line starts with one segment per
//! ancestor level below the root (`│   ` while that ancestor has later siblings, four spaces once
//! it was the last one) followed by `├───`, or `└───` for the last sibling.
//!
//! Reports and sections print their title in parentheses; a section directly inside another
//! section prints as SUBSECTION.
//!
//! Filtering
//!
//!     An optional predicate restricts which descendants are printed. Nodes failing it are not
//!     printed, but their children still are, attached where the skipped node would have been.
//!     "Last sibling" is decided among the printed nodes, so connectors stay correct. The root is
//!     always printed.

use crate::tree::{Node, NodeId, NodeKind, Tree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BRANCH: &str = "├───";
const LAST_BRANCH: &str = "└───";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// How emphasis (report and section names) is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineStyle {
    #[default]
    Plain,
    /// Bold ANSI escapes
    Terminal,
    /// `<strong>` emphasis, whole outline wrapped in `<pre>`
    Html,
}

impl OutlineStyle {
    fn bold(self, text: &str) -> String {
        match self {
            OutlineStyle::Plain => text.to_string(),
            OutlineStyle::Terminal => format!("\x1b[1m{text}\x1b[0m"),
            OutlineStyle::Html => format!("<strong>{text}</strong>"),
        }
    }
}

impl FromStr for OutlineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" | "none" => Ok(OutlineStyle::Plain),
            "terminal" => Ok(OutlineStyle::Terminal),
            "html" => Ok(OutlineStyle::Html),
            other => Err(format!(
                "unknown outline style '{other}' (expected plain, terminal or html)"
            )),
        }
    }
}

impl fmt::Display for OutlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutlineStyle::Plain => "plain",
            OutlineStyle::Terminal => "terminal",
            OutlineStyle::Html => "html",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineOptions {
    pub style: OutlineStyle,
    /// Print node ids in place of titles
    pub show_ids: bool,
    /// Turn section titles into `#S<number>` anchors
    pub link_sections: bool,
    /// Print only the titles (or type names of untitled nodes), as in a table of contents
    pub labels_only: bool,
}

/// Predicate keeping only reports and sections
pub fn sections_only(node: &Node) -> bool {
    matches!(node.kind(), NodeKind::Report | NodeKind::Section)
}

/// Plain outline of the subtree at `root`.
///
/// Panics when `root` is not live, like indexing the tree; the registry formatters check first.
pub fn render(tree: &Tree, root: NodeId, predicate: Option<&dyn Fn(&Node) -> bool>) -> String {
    render_with(tree, root, predicate, &OutlineOptions::default())
}

pub fn render_with(
    tree: &Tree,
    root: NodeId,
    predicate: Option<&dyn Fn(&Node) -> bool>,
    options: &OutlineOptions,
) -> String {
    let mut out = String::new();
    if options.style == OutlineStyle::Html {
        out.push_str("<pre>\n");
    }
    out.push_str(&node_line(tree, root, options));
    out.push('\n');

    let keep = |node: &Node| predicate.map_or(true, |p| p(node));
    let children = visible_children(tree, root, &keep);
    format_children(tree, &children, "", &keep, options, &mut out);

    if options.style == OutlineStyle::Html {
        out.push_str("</pre>\n");
    }
    out
}

/// Children of `id` as seen through the predicate: skipped nodes are replaced by their own
/// visible children
fn visible_children(tree: &Tree, id: NodeId, keep: &dyn Fn(&Node) -> bool) -> Vec<NodeId> {
    let mut visible = Vec::new();
    for child in tree[id].children() {
        if keep(&tree[*child]) {
            visible.push(*child);
        } else {
            visible.extend(visible_children(tree, *child, keep));
        }
    }
    visible
}

fn format_children(
    tree: &Tree,
    children: &[NodeId],
    prefix: &str,
    keep: &dyn Fn(&Node) -> bool,
    options: &OutlineOptions,
    out: &mut String,
) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&node_line(tree, *child, options));
        out.push('\n');

        let grandchildren = visible_children(tree, *child, keep);
        if !grandchildren.is_empty() {
            let child_prefix = format!("{prefix}{}", if is_last { SPACE } else { PIPE });
            format_children(tree, &grandchildren, &child_prefix, keep, options, out);
        }
    }
}

fn node_line(tree: &Tree, id: NodeId, options: &OutlineOptions) -> String {
    let node = &tree[id];
    let kind = node.kind();
    let name = if tree.is_subsection(id) {
        options.style.bold("SUBSECTION")
    } else if matches!(kind, NodeKind::Report | NodeKind::Section) {
        options.style.bold(kind.outline_name())
    } else {
        kind.outline_name().to_string()
    };

    let label = if options.show_ids {
        Some(id.to_string())
    } else {
        node.label().map(|title| match tree.section_number(id) {
            Some(number) if options.link_sections => {
                format!(r##"<a href="#S{number}">{title}</a>"##)
            }
            _ => title.to_string(),
        })
    };

    match (label, options.labels_only) {
        (Some(label), true) => label,
        (None, true) => name,
        (Some(label), false) => format!("{name} ({label})"),
        (None, false) => name,
    }
}
