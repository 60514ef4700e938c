//! HTML document emission
//!
//!     Walks a report tree and writes a standalone HTML page: the head (meta tag, the scripts and
//!     styles the tree actually needs), the pretext, the title, a linked table of contents, then
//!     every container's scaffolding around the markup its leaves produce.
//!
//!     Checks that can only be made once a tree is complete happen here: a tab needs one title per
//!     child and a grid cannot hold more children than it has cells.

use super::error::RenderError;
use super::leaf::{escape, LeafRenderer};
use crate::formats::outline::{render_with, sections_only, OutlineOptions, OutlineStyle};
use crate::tree::elements::{Fold, Grid, Section, Tab};
use crate::tree::{NodeData, NodeId, NodeKind, Tree};
use tracing::debug;

const TAB_SCRIPT: &str = r#"
    <script>
    function open_tab(evt, item_id, tab_name) {
        for (const el of document.getElementsByName(tab_name)) { el.style.display = "none"; }
        document.getElementById(item_id).style.display = "block";
        evt.currentTarget.className += " active";
    }
    function open_all_tabs(evt, tab_name) {
        for (const el of document.getElementsByName(tab_name)) { el.style.display = "block"; }
    }
    function open_defaults(class_name) {
        for (const el of document.getElementsByName("default_open")) { el.click(); }
    }
    </script>
"#;

const FOLD_SCRIPT: &str = r#"
    <script>
    function click_fold(button) {
        button.classList.toggle("active");
        const content = button.nextElementSibling;
        content.style.display = content.style.display === "block" ? "none" : "block";
    }
    </script>
"#;

const TEX_SCRIPT: &str = r#"
    <script src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
"#;

const CODE_SCRIPT: &str = r#"
    <script src="https://cdn.jsdelivr.net/gh/google/code-prettify@master/loader/run_prettify.js"></script>
"#;

const BASE_STYLES: &str = r#"
    body { font-family: sans-serif; margin: 20px; }
    img { max-width: 100%; }
    p { margin: 4px 0px; }
"#;

const TAB_STYLES: &str = r#"
    .tab { overflow: hidden; border: 1px solid #ccc; background-color: #f1f1f1; }
    .tab button { background-color: inherit; border: none; padding: 10px 14px; cursor: pointer; }
    .tab button.active { background-color: #ccc; }
    .tabcontent { display: none; padding: 6px 12px; border: 1px solid #ccc; border-top: none; }
    .topright { float: right; cursor: pointer; }
"#;

const GRID_STYLES: &str = r#"
    .grid-container { display: grid; gap: 10px; padding: 10px; }
    .grid-item { padding: 10px; text-align: center; }
"#;

const FOLD_STYLES: &str = r#"
    .fold { cursor: pointer; border: none; width: 30px; }
    .fold:after { content: "\002B"; }
    .fold.active:after { content: "\2212"; }
    .foldcontent { display: none; overflow: hidden; }
"#;

const TABLE_STYLES: &str = r#"
    table.sortable { border-collapse: collapse; }
    table.sortable th, table.sortable td { border: 1px solid #ddd; padding: 4px 8px; }
"#;

/// Page-level settings that are not part of the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Replaces the report's own meta tag when set
    pub meta: Option<String>,
    /// Extra markup appended to `<head>` (user scripts, stylesheets)
    pub head: String,
}

/// Render the document rooted at `root` (normally a report) to a full HTML page.
///
/// A stale `root` is reported as [`RenderError::Tree`].
pub fn render_document(
    tree: &Tree,
    root: NodeId,
    leaves: &dyn LeafRenderer,
    options: &HtmlOptions,
) -> Result<String, RenderError> {
    tree.node(root)?;
    let emitter = Emitter { tree, leaves };
    let html = emitter.document(root, options)?;
    debug!(node = %root, bytes = html.len(), "rendered html document");
    Ok(html)
}

struct Emitter<'a> {
    tree: &'a Tree,
    leaves: &'a dyn LeafRenderer,
}

impl Emitter<'_> {
    fn document(&self, root: NodeId, options: &HtmlOptions) -> Result<String, RenderError> {
        let tree = self.tree;
        let has = |kind| tree.has_kind(root, kind);
        let has_tex = tree
            .items(root, NodeKind::Section)
            .iter()
            .any(|s| matches!(tree[*s].data(), NodeData::Section(section) if section.has_tex));

        let mut head = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
        let report = match tree[root].data() {
            NodeData::Report(report) => Some(report),
            _ => None,
        };
        let meta = options
            .meta
            .as_deref()
            .or(report.map(|r| r.meta.as_str()))
            .unwrap_or_default();
        head.push_str(&format!("    {meta}\n"));
        for (needed, script) in [
            (has(NodeKind::Tab), TAB_SCRIPT),
            (has_tex, TEX_SCRIPT),
            (has(NodeKind::Code), CODE_SCRIPT),
            (has(NodeKind::Fold), FOLD_SCRIPT),
        ] {
            if needed {
                head.push_str(script);
            }
        }
        head.push_str("\n    <style>");
        head.push_str(BASE_STYLES);
        for (needed, styles) in [
            (has(NodeKind::Tab), TAB_STYLES),
            (has(NodeKind::Grid), GRID_STYLES),
            (has(NodeKind::Fold), FOLD_STYLES),
            (has(NodeKind::Table), TABLE_STYLES),
        ] {
            if needed {
                head.push_str(styles);
            }
        }
        head.push_str("    </style>\n");
        if !options.head.is_empty() {
            head.push_str(&options.head);
            head.push('\n');
        }
        head.push_str("</head>\n");

        let mut body = String::new();
        if let Some(report) = report.filter(|r| !r.pretext.is_empty()) {
            body.push_str(&format!("<pre>{}</pre>\n", report.pretext));
        }
        if has(NodeKind::Tab) {
            body.push_str("\n<body onload=\"open_defaults('tabcontent')\">\n");
        } else {
            body.push_str("\n<body>\n");
        }

        match tree[root].data() {
            NodeData::Report(report) => {
                body.push_str(&format!(
                    "\n<!-- START REPORT -->\n<h1 style = \"{}\">{}</h1>\n",
                    report.title_style,
                    escape(&report.title)
                ));
                body.push_str(&self.table_of_contents(root));
                for child in tree[root].children() {
                    body.push_str(&self.node(*child)?);
                }
                body.push_str("</body>\n\n<!-- END REPORT -->\n</html>");
            }
            _ => {
                body.push_str(&self.node(root)?);
                body.push_str("</body>\n</html>");
            }
        }

        Ok(head + &body)
    }

    /// Linked section outline without the report line, empty when there are no sections
    fn table_of_contents(&self, root: NodeId) -> String {
        if self.tree.sections(root).is_empty() {
            return String::new();
        }
        let options = OutlineOptions {
            style: OutlineStyle::Plain,
            link_sections: true,
            labels_only: true,
            show_ids: false,
        };
        let outline = render_with(self.tree, root, Some(&sections_only), &options);
        let entries: String = outline.lines().skip(1).map(|line| format!("{line}\n")).collect();
        format!("<pre>\n{entries}</pre>\n")
    }

    fn node(&self, id: NodeId) -> Result<String, RenderError> {
        match self.tree[id].data() {
            NodeData::Section(section) => self.section(id, section),
            NodeData::Tab(tab) => self.tab(id, tab),
            NodeData::Fold(fold) => self.fold(id, fold),
            NodeData::Grid(grid) => self.grid(id, grid),
            NodeData::Report(_) => Err(RenderError::Leaf {
                node: id,
                kind: NodeKind::Report,
                message: "a report can only be rendered as a whole document".to_string(),
            }),
            _ => self.leaves.render(self.tree, id),
        }
    }

    fn children(&self, id: NodeId) -> Result<Vec<String>, RenderError> {
        self.tree[id]
            .children()
            .iter()
            .map(|child| self.node(*child))
            .collect()
    }

    fn section(&self, id: NodeId, section: &Section) -> Result<String, RenderError> {
        let tree = self.tree;
        let depth = tree.depth(id);
        let indent = "    ".repeat(depth);
        let number = tree.section_number(id).unwrap_or_default();
        let section_type = if tree.is_subsection(id) {
            "SUBSECTION"
        } else {
            "SECTION"
        };
        let heading = format!("h{}", (depth + 1).min(6));

        let mut html = format!("\n{indent}<!-- START {section_type} {number} -->\n");
        html.push_str(&format!(
            "\n{indent}<div id=\"S{number}\">{indent}<section style=\"margin-left:{}px; margin-bottom:10px; border-left:solid; padding-left:10px\">\n",
            20 * depth
        ));
        html.push_str(&format!(
            "{indent}<{heading} style = \"{};\">{}</{heading}>\n\n",
            section.title_style,
            escape(&section.title)
        ));

        for (child, child_html) in tree[id].children().iter().zip(self.children(id)?) {
            let tex_section = matches!(tree[*child].data(), NodeData::Section(s) if s.has_tex);
            if tex_section {
                html.push_str(&child_html.replace('\n', "<br>\n"));
            } else {
                html.push_str(&child_html);
            }
        }

        html.push_str(&format!("\n{indent}</section></div>\n"));
        html.push_str(&format!("\n{indent}<!-- END {section_type} {number} -->\n"));
        Ok(html)
    }

    /// The top-level section enclosing `id`, numbered "0" when there is none
    fn root_section(&self, id: NodeId) -> (String, Option<NodeId>) {
        let section = self
            .tree
            .ancestors(id, None)
            .into_iter()
            .filter(|a| self.tree[*a].kind() == NodeKind::Section)
            .last();
        match section {
            Some(section) => (
                self.tree.section_number(section).unwrap_or_default(),
                Some(section),
            ),
            None => ("0".to_string(), None),
        }
    }

    /// `<PREFIX>-<section number>-<index among that section's containers of this kind>`
    fn container_name(&self, id: NodeId, prefix: &str) -> String {
        let (number, section) = self.root_section(id);
        let scope = section.unwrap_or_else(|| self.tree.root(id, None));
        let index = self
            .tree
            .items(scope, self.tree[id].kind())
            .iter()
            .position(|n| *n == id)
            .unwrap_or_default();
        format!("{prefix}-{number}-{index}")
    }

    fn tab(&self, id: NodeId, tab: &Tab) -> Result<String, RenderError> {
        let children = self.tree[id].children();
        if tab.tab_titles.len() != children.len() {
            return Err(RenderError::TabTitleMismatch {
                node: id,
                titles: tab.tab_titles.len(),
                items: children.len(),
            });
        }

        let indent = "    ".repeat(self.tree.depth(id));
        let name = self.container_name(id, "TAB");
        let tab_style = tab
            .tab_style
            .as_deref()
            .map(|s| format!("style=\"{s}\""))
            .unwrap_or_default();

        let mut html = format!("\n{indent}<!-- START {name} -->\n");
        html.push_str(&format!("{indent}<br><div class=\"tab\" {tab_style}>\n"));
        for (i, title) in tab.tab_titles.iter().enumerate() {
            let default_open = if i == 0 { "name=\"default_open\" " } else { "" };
            html.push_str(&format!(
                "    {indent}<button class=\"tablinks\" {default_open}style=\"{}\" onclick=\"open_tab(event, '{name}-{i}','{name}' )\"><strong>{}</strong></button>\n",
                tab.button_style(i),
                escape(title)
            ));
        }
        if !children.is_empty() {
            html.push_str(&format!(
                "    {indent}<button class=\"tablinks\" style=\"{}\" onclick=\"open_all_tabs(event, '{name}')\"><strong>Open All</strong></button>\n",
                tab.button_style(children.len() - 1)
            ));
        }
        html.push_str(&format!("{indent}</div>\n"));

        for (i, child_html) in self.children(id)?.into_iter().enumerate() {
            let display = if i == 0 { "style=\"display:block\"" } else { "" };
            let content_style = tab
                .content_styles
                .get(i)
                .map(|s| format!(" content-style=\"{s}\""))
                .unwrap_or_default();
            html.push_str(&format!(
                "{indent}<div id=\"{name}-{i}\" {display} class=\"tabcontent\" name=\"{name}\"{content_style}>\n"
            ));
            html.push_str(&format!(
                "    {indent}<span onclick=\"this.parentElement.style.display='none'\" class=\"topright\">x</span>\n"
            ));
            html.push_str(&child_html);
            html.push_str(&format!("{indent}</div>\n"));
        }
        html.push_str(&format!("{indent}{}\n{indent}<!-- END {name} -->\n", tab.end));
        Ok(html)
    }

    fn fold(&self, id: NodeId, fold: &Fold) -> Result<String, RenderError> {
        let indent = "    ".repeat(self.tree.depth(id));
        let name = self.container_name(id, "FOLD");

        let mut html = format!("\n{indent}<!-- START {name} -->\n");
        html.push_str(&format!(
            "    {indent}<button type=\"button\" style=\"{}\" class=\"fold\" onclick=\"click_fold(this)\"></button>\n",
            fold.button_style
        ));
        html.push_str(&format!(
            "        {indent}<div class=\"foldcontent\" style=\"{}\">\n",
            fold.content_style
        ));
        for child_html in self.children(id)? {
            html.push_str(&child_html);
        }
        html.push_str(&format!("        {indent}</div>{}\n", fold.end));
        html.push_str(&format!("{indent}<!-- END {name} -->\n"));
        Ok(html)
    }

    fn grid(&self, id: NodeId, grid: &Grid) -> Result<String, RenderError> {
        let tree = self.tree;
        let children = tree[id].children();
        if children.len() > grid.capacity() {
            return Err(RenderError::GridOverflow {
                node: id,
                children: children.len(),
                capacity: grid.capacity(),
            });
        }

        let indent = "    ".repeat(tree.depth(id));
        let nested = tree[id]
            .parent()
            .is_some_and(|p| tree[p].kind() == NodeKind::Grid);
        let cols = "auto ".repeat(grid.ncols as usize);
        let rows = "auto ".repeat(grid.nrows as usize);
        let mut grid_style = grid.grid_style.clone();
        if nested {
            grid_style.push_str("padding:0px");
        }

        let mut html = format!("\n{indent}<!-- START GRID -->\n");
        html.push_str(&format!(
            "{indent}<div class=\"grid-container\" style=\"grid-template-columns: {cols}; grid-template-rows: {rows}; {grid_style}\">\n"
        ));
        for (i, child_html) in self.children(id)?.into_iter().enumerate() {
            let mut item_style = grid.item_style(i).to_string();
            if nested {
                item_style.push_str("padding:0px;");
            }
            let title = grid
                .item_titles
                .as_ref()
                .and_then(|titles| titles.get(i))
                .map(|title| {
                    format!(
                        "<text style=\"font-size:{}px; font-weight:{};\">{}</text>",
                        grid.font_size,
                        grid.font_weight,
                        escape(title)
                    )
                })
                .unwrap_or_default();
            html.push_str(&format!(
                "{indent}    <div class=\"grid-item\" style=\"{item_style}\">{title}{}</div>\n",
                child_html.trim_matches('\n')
            ));
        }
        html.push_str(&format!("{indent}</div>{}\n{indent}<!-- END GRID -->\n", grid.end));
        Ok(html)
    }
}
