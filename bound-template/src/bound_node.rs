use bound_dom::{Listener, Node};
use indexmap::IndexMap;

/// A binding resolved against one instance.
#[derive(Debug, Clone)]
pub enum BoundNode {
    /// Text node overwritten wholesale on update.
    Text { node: Node },
    /// Attribute re-rendered from `original_value` on every update. One of
    /// these is shared by every name appearing in the attribute.
    Attribute {
        element: Node,
        attr_name: String,
        original_value: String,
        values: IndexMap<String, String>,
    },
    /// Event listener slot; `handler` is the currently attached listener.
    EventHandler {
        element: Node,
        event_name: String,
        handler: Option<Listener>,
    },
    /// Slot in the instance's property bag for `element`.
    Property { element: Node, prop_name: String },
}

impl BoundNode {
    /// The text node or element this binding writes to.
    pub fn node(&self) -> &Node {
        match self {
            BoundNode::Text { node } => node,
            BoundNode::Attribute { element, .. }
            | BoundNode::EventHandler { element, .. }
            | BoundNode::Property { element, .. } => element,
        }
    }
}
