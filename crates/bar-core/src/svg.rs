// File: crates/bar-core/src/svg.rs
// Summary: SVG markup serialization of a retained `Scene`.

use std::fmt::Write as _;

use crate::surface::{NodeId, Scene, Tag};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn escape(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

impl Scene {
    /// Markup for the first `svg` element, or `None` before the canvas exists.
    pub fn to_svg_string(&self) -> Option<String> {
        self.find_tag(Tag::Svg).map(|svg| self.markup(svg))
    }

    /// Markup for `node` and its subtree, two-space indented.
    pub fn markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, 0, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.node(id) else { return };
        let indent = "  ".repeat(depth);
        let name = node.tag.name();

        out.push_str(&indent);
        out.push('<');
        out.push_str(name);
        if node.tag == Tag::Svg {
            let _ = write!(out, " xmlns=\"{SVG_NS}\"");
        }
        for (key, value) in &node.attrs {
            let _ = write!(out, " {key}=\"");
            escape(&value.to_string(), out);
            out.push('"');
        }
        if !node.styles.is_empty() {
            let style = node
                .styles
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(" style=\"");
            escape(&style, out);
            out.push('"');
        }

        match (&node.text, node.children.is_empty()) {
            (None, true) => out.push_str("/>\n"),
            (Some(text), true) => {
                out.push('>');
                escape(text, out);
                let _ = writeln!(out, "</{name}>");
            }
            (text, false) => {
                out.push_str(">\n");
                if let Some(text) = text {
                    out.push_str(&indent);
                    out.push_str("  ");
                    escape(text, out);
                    out.push('\n');
                }
                for &child in &node.children {
                    self.write_node(child, depth + 1, out);
                }
                let _ = writeln!(out, "{indent}</{name}>");
            }
        }
    }
}
