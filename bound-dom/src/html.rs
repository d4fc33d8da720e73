use crate::markup::is_void;
use crate::{Node, NodeKind};

impl Node {
    /// Serializes this node (a fragment serializes its children only).
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node.kind() {
        NodeKind::Text => escape_into(&node.text_content(), false, out),
        NodeKind::Comment => {
            out.push_str("<!--");
            out.push_str(&node.text_content());
            out.push_str("-->");
        }
        NodeKind::Fragment => {
            for child in node.children() {
                write_node(&child, out);
            }
        }
        NodeKind::Element => {
            let tag = node.tag().unwrap_or_default();
            out.push('<');
            out.push_str(&tag);
            for attr in node.attributes() {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_into(&attr.value, true, out);
                out.push('"');
            }
            out.push('>');
            if is_void(&tag) {
                return;
            }
            for child in node.children() {
                write_node(&child, out);
            }
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
    }
}

fn escape_into(s: &str, attribute: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
