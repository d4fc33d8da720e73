use bound_dom::{Node, NodeKind};
use tracing::debug;

use crate::error::BindError;
use crate::path::Path;
use crate::schema::Schema;
use crate::syntax::{Matcher, Syntax};

/// Scans the children of `root` for placeholders and records where each one
/// lives.
///
/// Text nodes holding a placeholder are split in place so that every
/// placeholder ends up alone in its own text node; `root` is therefore
/// mutated and must not be modified concurrently.
pub fn parse(root: &Node, syntax: &Syntax) -> Result<Schema, BindError> {
    let matcher = syntax.matcher()?;
    let mut schema = Schema::new(syntax.clone());
    parse_children(&matcher, &mut schema, root, &Path::root())?;
    debug!(
        text = schema.text_bindings().len(),
        attributes = schema.attribute_bindings().len(),
        "template parsed"
    );
    Ok(schema)
}

// Depth-first with prefix visiting. The child count is re-read on every step
// because splitting a text node inserts a new sibling after it.
fn parse_children(
    matcher: &Matcher,
    schema: &mut Schema,
    parent: &Node,
    path: &Path,
) -> Result<(), BindError> {
    let mut index = 0;
    while let Some(child) = parent.child(index) {
        parse_node(matcher, schema, &child, path.child(index))?;
        index += 1;
    }
    Ok(())
}

fn parse_node(
    matcher: &Matcher,
    schema: &mut Schema,
    node: &Node,
    path: Path,
) -> Result<(), BindError> {
    match node.kind() {
        NodeKind::Text => parse_text(matcher, schema, node, path),
        NodeKind::Element => {
            parse_attributes(matcher, schema, node, &path);
            parse_children(matcher, schema, node, &path)
        }
        NodeKind::Fragment => parse_children(matcher, schema, node, &path),
        NodeKind::Comment => Ok(()),
    }
}

fn parse_attributes(matcher: &Matcher, schema: &mut Schema, element: &Node, path: &Path) {
    for attr in element.attributes() {
        let names = matcher.names(&attr.value);
        if !names.is_empty() {
            schema.add_attribute_binding(names, &attr.name, path.clone());
        }
    }
}

fn parse_text(
    matcher: &Matcher,
    schema: &mut Schema,
    node: &Node,
    path: Path,
) -> Result<(), BindError> {
    let content = node.text_content();
    let Some(found) = matcher.first(&content) else {
        return Ok(());
    };
    if found.start > 0 {
        // The tail starts with the placeholder and is visited next.
        node.split_text(found.start)?;
        return Ok(());
    }
    if content.len() > found.end {
        node.split_text(found.end)?;
    }
    schema.add_text_binding(found.name, path);
    Ok(())
}
