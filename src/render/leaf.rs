//! Leaf markup
//!
//!     Container scaffolding is generated by the document emitter; the markup for leaf content
//!     comes from a [`LeafRenderer`]. Richer renderers (embedding images as base64, inlining plot
//!     pages, highlighting code) plug in here without touching the tree or the emitter.
//!
//!     [`BasicLeafRenderer`] is the built-in implementation. It only references external files
//!     and never reads them, so it works on any tree, including one loaded from a record on
//!     another machine.

use super::error::RenderError;
use crate::tree::elements::{Code, Image, Link, Map, Pdf, Plot, Quote, Table, Text};
use crate::tree::{NodeData, NodeId, Tree};
use serde_json::Value;
use std::fmt::Write;

/// Produces the markup for one leaf node.
///
/// Called once per leaf, in document order. Receives the tree read-only.
pub trait LeafRenderer {
    fn render(&self, tree: &Tree, node: NodeId) -> Result<String, RenderError>;
}

/// Plain HTML for every leaf kind
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicLeafRenderer;

impl LeafRenderer for BasicLeafRenderer {
    fn render(&self, tree: &Tree, node: NodeId) -> Result<String, RenderError> {
        let indent = "    ".repeat(tree.depth(node));
        let html = match tree[node].data() {
            NodeData::Text(text) => text_html(text, &indent),
            NodeData::Quote(quote) => quote_html(quote, &indent),
            NodeData::Code(code) => code_html(code),
            NodeData::Link(link) => link_html(link, &indent),
            NodeData::Image(image) => image_html(image, &indent),
            NodeData::Plot(plot) => plot_html(plot, &indent),
            NodeData::Map(map) => map_html(map, &indent),
            NodeData::Table(table) => table_html(table, &indent),
            NodeData::Pdf(pdf) => pdf_html(pdf, &indent),
            other => {
                return Err(RenderError::Leaf {
                    node,
                    kind: other.kind(),
                    message: "containers are not leaf content".to_string(),
                })
            }
        };
        Ok(html)
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn paragraph_body(text: &str, formatted: bool) -> String {
    if formatted {
        text.to_string()
    } else {
        escape(text).replace('\n', "<br>\n")
    }
}

fn text_html(text: &Text, indent: &str) -> String {
    format!(
        "\n{indent}<p style = \"font-size:{}px; text-align:{}; {}\">\n{}\n{indent}</p>{}\n",
        text.font_size,
        text.alignment,
        text.style,
        paragraph_body(&text.text, text.formatted),
        text.end
    )
}

fn quote_html(quote: &Quote, indent: &str) -> String {
    format!(
        "\n{indent}<blockquote style = \"font-size:{}px; text-align:{};\">\n{}\n{indent}</blockquote>{}\n",
        quote.font_size,
        quote.alignment,
        paragraph_body(&quote.text, false),
        quote.end
    )
}

fn code_html(code: &Code) -> String {
    let class = match code.linenums {
        Some(first) => format!("prettyprint linenums:{first}"),
        None => "prettyprint".to_string(),
    };
    format!(
        "\n<pre class=\"{class}\">\n{}\n</pre>{}\n",
        escape(&code.code_text),
        code.end
    )
}

fn link_html(link: &Link, indent: &str) -> String {
    format!(
        "\n{indent}<a href=\"{}\" style=\"{}\">{}</a>\n{}",
        escape(&link.link),
        link.link_style,
        escape(&link.link_title),
        link.end
    )
}

fn image_html(image: &Image, indent: &str) -> String {
    let title = if image.title.is_empty() {
        String::new()
    } else {
        format!("{}<br>", escape(&image.title))
    };
    let mut size = String::new();
    if let Some(width) = image.scaled_width() {
        let _ = write!(size, "width:{width}px; ");
    }
    if let Some(height) = image.scaled_height() {
        let _ = write!(size, "height:{height}px; ");
    }
    format!(
        "<br>\n{indent}{title}<img src=\"{}\" style=\"{size}{}\">{}\n",
        escape(&image.source),
        image.style,
        image.end
    )
}

fn frame_html(
    source: &str,
    width: Option<u32>,
    height: Option<u32>,
    scales: (f64, f64),
    indent: &str,
) -> String {
    let mut size = String::new();
    if let Some(width) = width {
        let _ = write!(size, " width=\"{}\"", (f64::from(width) * scales.0).round());
    }
    if let Some(height) = height {
        let _ = write!(size, " height=\"{}\"", (f64::from(height) * scales.1).round());
    }
    format!(
        "\n{indent}<iframe src=\"{}\"{size} style=\"border:none\"></iframe>",
        escape(source)
    )
}

fn plot_html(plot: &Plot, indent: &str) -> String {
    let frame = frame_html(
        &plot.source,
        plot.width,
        plot.height,
        (plot.xscale, plot.yscale),
        indent,
    );
    format!("{frame}{}\n", plot.end)
}

fn map_html(map: &Map, indent: &str) -> String {
    let frame = frame_html(
        &map.source,
        map.width,
        map.height,
        (map.xscale, map.yscale),
        indent,
    );
    format!("{frame}{}\n", map.end)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => escape(s),
        Value::Null => String::new(),
        other => escape(&other.to_string()),
    }
}

fn table_html(table: &Table, indent: &str) -> String {
    let mut html = format!("\n{indent}<table class=\"sortable\">\n{indent}    <thead><tr>");
    for column in &table.columns {
        let _ = write!(
            html,
            "<th style=\"{}\">{}</th>",
            table.header_style,
            escape(column)
        );
    }
    html.push_str("</tr></thead>\n");
    let _ = writeln!(html, "{indent}    <tbody>");

    for (r, row) in table.rows.iter().enumerate() {
        let background = table
            .background_colors
            .get(r)
            .and_then(Option::as_deref)
            .map(|color| format!("background-color:{color}; "))
            .unwrap_or_default();
        let _ = write!(
            html,
            "{indent}        <tr style=\"{background}{}\">",
            table.row_style
        );
        for (c, value) in row.iter().enumerate() {
            let color = table
                .cell_colors
                .get(r)
                .and_then(|colors| colors.get(c))
                .and_then(Option::as_deref);
            match color {
                Some(color) => {
                    let _ = write!(
                        html,
                        "<td style=\"background-color:{color}\">{}</td>",
                        cell_text(value)
                    );
                }
                None => {
                    let _ = write!(html, "<td>{}</td>", cell_text(value));
                }
            }
        }
        html.push_str("</tr>\n");
    }
    let _ = writeln!(html, "{indent}    </tbody>\n{indent}</table>");
    html
}

fn pdf_html(pdf: &Pdf, indent: &str) -> String {
    let mut size = String::new();
    if let Some(width) = pdf.width {
        let _ = write!(size, " width=\"{width}\"");
    }
    if let Some(height) = pdf.height {
        let _ = write!(size, " height=\"{height}\"");
    }
    format!(
        "<br>\n{indent}<embed src=\"{}\"{size} type=\"application/pdf\" style=\"{}\">{}\n",
        escape(&pdf.path),
        pdf.style,
        pdf.end
    )
}
