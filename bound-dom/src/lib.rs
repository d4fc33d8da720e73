//! Mutable document tree for bound templates.
//!
//! Nodes are shared `Rc` handles: cloning a [`Node`] clones the handle, while
//! [`Node::deep_clone`] copies the subtree.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

mod error;
pub mod events;
mod html;
pub mod markup;
mod template;

pub use error::DomError;
pub use events::{Event, Listener, ListenerRegistry};
pub use markup::parse_fragment;
pub use template::Template;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identity. Deep clones get fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Fragment,
    Element,
    Text,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone)]
enum Data {
    Fragment,
    Element { tag: String, attrs: Vec<Attr> },
    Text(String),
    Comment(String),
}

impl Data {
    fn kind(&self) -> NodeKind {
        match self {
            Data::Fragment => NodeKind::Fragment,
            Data::Element { .. } => NodeKind::Element,
            Data::Text(_) => NodeKind::Text,
            Data::Comment(_) => NodeKind::Comment,
        }
    }
}

struct Inner {
    id: NodeId,
    data: RefCell<Data>,
    parent: RefCell<Weak<Inner>>,
    children: RefCell<Vec<Node>>,
    listeners: RefCell<ListenerRegistry>,
}

#[derive(Clone)]
pub struct Node(Rc<Inner>);

impl Node {
    fn new(data: Data) -> Self {
        Node(Rc::new(Inner {
            id: NodeId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            data: RefCell::new(data),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            listeners: RefCell::new(ListenerRegistry::new()),
        }))
    }

    pub fn fragment() -> Self {
        Self::new(Data::Fragment)
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(Data::Element {
            tag: tag.into(),
            attrs: Vec::new(),
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(Data::Text(content.into()))
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self::new(Data::Comment(content.into()))
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    pub fn kind(&self) -> NodeKind {
        self.0.data.borrow().kind()
    }

    pub fn is_text(&self) -> bool {
        self.kind() == NodeKind::Text
    }

    pub fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn tag(&self) -> Option<String> {
        match &*self.0.data.borrow() {
            Data::Element { tag, .. } => Some(tag.clone()),
            _ => None,
        }
    }

    // ---- tree structure ----

    pub fn parent(&self) -> Option<Node> {
        self.0.parent.borrow().upgrade().map(Node)
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.children.borrow().clone()
    }

    pub fn child(&self, index: usize) -> Option<Node> {
        self.0.children.borrow().get(index).cloned()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    /// Position of this node among its parent's children.
    pub fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let siblings = parent.0.children.borrow();
        siblings.iter().position(|c| c.ptr_eq(self))
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.0.children.borrow_mut().retain(|c| !c.ptr_eq(self));
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }

    pub fn append_child(&self, child: Node) {
        child.detach();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child);
    }

    /// Inserts `child` so that it lands before the node currently at `index`.
    /// Moving a child within the same parent accounts for its old slot.
    pub fn insert_child(&self, index: usize, child: Node) -> Result<(), DomError> {
        let len = self.child_count();
        if index > len {
            return Err(DomError::IndexOutOfBounds { index, len });
        }
        let mut index = index;
        if child.parent().is_some_and(|p| p.ptr_eq(self)) {
            if let Some(from) = child.index_in_parent() {
                if from < index {
                    index -= 1;
                }
            }
        }
        child.detach();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().insert(index, child);
        Ok(())
    }

    pub fn remove_child(&self, index: usize) -> Result<Node, DomError> {
        let len = self.child_count();
        if index >= len {
            return Err(DomError::IndexOutOfBounds { index, len });
        }
        let child = self.0.children.borrow_mut().remove(index);
        *child.0.parent.borrow_mut() = Weak::new();
        Ok(child)
    }

    fn clear_children(&self) {
        let old = std::mem::take(&mut *self.0.children.borrow_mut());
        for c in old {
            *c.0.parent.borrow_mut() = Weak::new();
        }
    }

    // ---- text ----

    /// Text of a text/comment node, or the concatenated descendant text of an
    /// element or fragment.
    pub fn text_content(&self) -> String {
        match &*self.0.data.borrow() {
            Data::Text(t) | Data::Comment(t) => return t.clone(),
            Data::Element { .. } | Data::Fragment => {}
        }
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Replaces a text/comment node's data, or an element's children with a
    /// single text node (no child at all when `content` is empty).
    pub fn set_text_content(&self, content: impl Into<String>) {
        let content = content.into();
        {
            let mut data = self.0.data.borrow_mut();
            if let Data::Text(t) | Data::Comment(t) = &mut *data {
                *t = content;
                return;
            }
        }
        self.clear_children();
        if !content.is_empty() {
            self.append_child(Node::text(content));
        }
    }

    /// Splits a text node at byte `offset`. This node keeps the head; the tail
    /// becomes a new text node inserted right after it and is returned.
    pub fn split_text(&self, offset: usize) -> Result<Node, DomError> {
        let tail = {
            let mut data = self.0.data.borrow_mut();
            let kind = data.kind();
            let Data::Text(t) = &mut *data else {
                return Err(DomError::NotText(kind));
            };
            if offset > t.len() || !t.is_char_boundary(offset) {
                return Err(DomError::InvalidOffset {
                    offset,
                    len: t.len(),
                });
            }
            t.split_off(offset)
        };
        let tail = Node::text(tail);
        if let (Some(parent), Some(index)) = (self.parent(), self.index_in_parent()) {
            parent.insert_child(index + 1, tail.clone())?;
        }
        Ok(tail)
    }

    // ---- attributes ----

    pub fn attributes(&self) -> Vec<Attr> {
        match &*self.0.data.borrow() {
            Data::Element { attrs, .. } => attrs.clone(),
            _ => Vec::new(),
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        match &*self.0.data.borrow() {
            Data::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.clone()),
            _ => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Sets an attribute, keeping its position when it already exists.
    pub fn set_attribute(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let mut data = self.0.data.borrow_mut();
        let kind = data.kind();
        let Data::Element { attrs, .. } = &mut *data else {
            return Err(DomError::NotElement(kind));
        };
        let name = name.into();
        let value = value.into();
        match attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => attrs.push(Attr { name, value }),
        }
        Ok(())
    }

    /// Removes an attribute, returning its last value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let mut data = self.0.data.borrow_mut();
        let Data::Element { attrs, .. } = &mut *data else {
            return None;
        };
        let pos = attrs.iter().position(|a| a.name == name)?;
        Some(attrs.remove(pos).value)
    }

    // ---- events ----

    pub fn add_event_listener(&self, event: impl Into<String>, listener: Listener) {
        self.0.listeners.borrow_mut().on(event, listener);
    }

    pub fn remove_event_listener(&self, event: &str, listener: &Listener) -> bool {
        self.0.listeners.borrow_mut().remove(event, listener)
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.0.listeners.borrow().count(event)
    }

    /// Invokes this node's listeners for `event.name` and returns how many ran.
    /// Listeners are snapshotted first, so they may freely mutate the node.
    pub fn dispatch_event(&self, event: &Event) -> usize {
        let targets = self.0.listeners.borrow().matching(&event.name);
        for listener in &targets {
            listener.call(event);
        }
        targets.len()
    }

    // ---- cloning ----

    /// Copies this node and its subtree. Listeners are not copied.
    pub fn deep_clone(&self) -> Node {
        let copy = Node::new(self.0.data.borrow().clone());
        for child in self.0.children.borrow().iter() {
            copy.append_child(child.deep_clone());
        }
        copy
    }
}

fn collect_text(node: &Node, out: &mut String) {
    for child in node.0.children.borrow().iter() {
        match &*child.0.data.borrow() {
            Data::Text(t) => out.push_str(t),
            Data::Comment(_) => {}
            Data::Element { .. } | Data::Fragment => collect_text(child, out),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.0.id)
            .field("kind", &self.kind())
            .field("html", &self.to_html())
            .finish()
    }
}

/// Attribute list for the [`h`] builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attrs(pub Vec<Attr>);

impl Attrs {
    pub fn new() -> Self {
        Self(Vec::new())
    }
    /// Adds an attribute, or replaces the value of one with the same name.
    pub fn set(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        let (name, value) = (k.into(), v.into());
        match self.0.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.0.push(Attr { name, value }),
        }
        self
    }
}

impl From<()> for Attrs {
    fn from(_: ()) -> Self {
        Attrs::default()
    }
}
impl From<Vec<(&str, &str)>> for Attrs {
    fn from(v: Vec<(&str, &str)>) -> Self {
        v.into_iter().fold(Attrs::new(), |a, (k, v)| a.set(k, v))
    }
}

pub fn h(tag: impl Into<String>, attrs: impl Into<Attrs>, children: Vec<Node>) -> Node {
    let node = Node::new(Data::Element {
        tag: tag.into(),
        attrs: attrs.into().0,
    });
    for child in children {
        node.append_child(child);
    }
    node
}

pub fn text(t: impl Into<String>) -> Node {
    Node::text(t)
}
