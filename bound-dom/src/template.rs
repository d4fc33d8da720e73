use crate::{DomError, Node, NodeKind, markup};

/// A template declaration: inert content that instances are cloned from.
#[derive(Debug, Clone)]
pub struct Template {
    content: Node,
}

impl Template {
    /// Wraps `content` as the template's instantiable fragment. A non-fragment
    /// node becomes the single child of a new fragment.
    pub fn new(content: Node) -> Self {
        if content.kind() == NodeKind::Fragment {
            return Self { content };
        }
        let fragment = Node::fragment();
        fragment.append_child(content);
        Self { content: fragment }
    }

    pub fn parse(markup: &str) -> Result<Self, DomError> {
        Ok(Self {
            content: markup::parse_fragment(markup)?,
        })
    }

    pub fn content(&self) -> &Node {
        &self.content
    }

    /// Deep copy of the content, ready to be bound and inserted elsewhere.
    pub fn instantiate(&self) -> Node {
        self.content.deep_clone()
    }
}

impl From<Node> for Template {
    fn from(content: Node) -> Self {
        Template::new(content)
    }
}
