use std::collections::HashMap;

use bound_dom::{Listener, Node, NodeId};
use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::bound_node::BoundNode;
use crate::error::BindError;
use crate::syntax::Matcher;
use crate::value::Value;

/// Property slots of one element; `None` until a value is set.
pub type Properties = IndexMap<String, Option<Value>>;

/// Out-of-band values for elements of one instance, keyed by element.
#[derive(Debug, Default)]
pub struct PropertyBag {
    slots: HashMap<NodeId, Properties>,
}

impl PropertyBag {
    /// Creates the element's entry if needed and the slot as absent.
    fn declare(&mut self, element: &Node, prop_name: &str) {
        self.slots
            .entry(element.id())
            .or_default()
            .insert(prop_name.to_string(), None);
    }

    fn store(&mut self, element: &Node, prop_name: &str, value: Value) {
        self.slots
            .entry(element.id())
            .or_default()
            .insert(prop_name.to_string(), Some(value));
    }

    pub fn get(&self, element: &Node) -> Option<&Properties> {
        self.slots.get(&element.id())
    }
}

/// Live bindings of one template instance.
///
/// `set` pushes a value into every position bound to a name. Names the
/// template never mentioned are ignored.
#[derive(Debug)]
pub struct TemplateBindings {
    matcher: Matcher,
    nodes: Vec<BoundNode>,
    map: IndexMap<String, Vec<usize>>,
    properties: PropertyBag,
}

impl TemplateBindings {
    pub(crate) fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            nodes: Vec::new(),
            map: IndexMap::new(),
            properties: PropertyBag::default(),
        }
    }

    /// Registers `node` once and indexes it under each of `names`.
    pub(crate) fn register<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a str>,
        node: BoundNode,
    ) {
        let index = self.nodes.len();
        if let BoundNode::Property { element, prop_name } = &node {
            self.properties.declare(element, prop_name);
        }
        self.nodes.push(node);
        for name in names {
            let slots = self.map.entry(name.to_string()).or_default();
            if !slots.contains(&index) {
                slots.push(index);
            }
        }
    }

    /// Updates every position bound to `name`.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let Self {
            matcher,
            nodes,
            map,
            properties,
        } = self;
        let Some(indices) = map.get(name) else {
            trace!(binding = name, "set on unbound name ignored");
            return;
        };
        trace!(binding = name, targets = indices.len(), kind = value.type_name(), "set");

        let text = value.to_string();
        for &index in indices {
            match &mut nodes[index] {
                BoundNode::Text { node } => node.set_text_content(text.as_str()),
                BoundNode::EventHandler {
                    element,
                    event_name,
                    handler,
                } => {
                    if let Some(previous) = handler.take() {
                        element.remove_event_listener(event_name, &previous);
                    }
                    match &value {
                        Value::Handler(listener) => {
                            element.add_event_listener(event_name.as_str(), listener.clone());
                            *handler = Some(listener.clone());
                        }
                        other => warn!(
                            binding = name,
                            event = %event_name,
                            kind = other.type_name(),
                            "event binding needs a handler; listener cleared"
                        ),
                    }
                }
                BoundNode::Property { element, prop_name } => {
                    properties.store(element, prop_name, value.clone());
                }
                BoundNode::Attribute {
                    element,
                    attr_name,
                    original_value,
                    values,
                } => {
                    if let Some(slot) = values.get_mut(name) {
                        slot.clone_from(&text);
                    }
                    let rendered = matcher.render(original_value, values);
                    if let Err(err) = element.set_attribute(attr_name.as_str(), rendered) {
                        warn!(binding = name, attr = %attr_name, %err, "attribute update failed");
                    }
                }
            }
        }
    }

    /// Calls [`set`](Self::set) for each entry, in iteration order.
    pub fn set_data<I, K, V>(&mut self, data: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in data {
            self.set(name.as_ref(), value);
        }
    }

    /// Applies a JSON object as a record, keeping its key order.
    pub fn set_json(&mut self, data: &serde_json::Value) -> Result<(), BindError> {
        let found = match data {
            serde_json::Value::Object(map) => {
                self.set_data(map);
                return Ok(());
            }
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
        };
        Err(BindError::NotARecord { found })
    }

    /// Bound names, in first-registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of distinct bound names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn bound_nodes(&self, name: &str) -> impl Iterator<Item = &BoundNode> {
        self.map
            .get(name)
            .into_iter()
            .flatten()
            .map(|&i| &self.nodes[i])
    }

    /// The listener currently attached through event binding `name`, if any.
    pub fn handler(&self, name: &str) -> Option<&Listener> {
        self.bound_nodes(name).find_map(|node| match node {
            BoundNode::EventHandler { handler, .. } => handler.as_ref(),
            _ => None,
        })
    }

    pub fn properties(&self, element: &Node) -> Option<&Properties> {
        self.properties.get(element)
    }

    /// Current value of a property slot; `None` when absent or never bound.
    pub fn property(&self, element: &Node, prop_name: &str) -> Option<&Value> {
        self.properties(element)?.get(prop_name)?.as_ref()
    }
}
