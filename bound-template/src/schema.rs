use bound_dom::{Node, NodeKind};
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bindings::TemplateBindings;
use crate::bound_node::BoundNode;
use crate::error::BindError;
use crate::path::Path;
use crate::syntax::{Matcher, Syntax, dash_case_to_camel_case};

/// A placeholder that fills a whole text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBinding {
    pub name: String,
    pub path: Path,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeKind {
    /// Names are substituted into the attribute text.
    Interpolation,
    /// `on-<event>`: the attribute is replaced by an event listener.
    Event { event_name: String },
    /// `<prop>$`: the attribute is replaced by a property slot.
    Property { prop_name: String },
}

impl AttributeKind {
    /// Classifies by attribute name. `on-` takes precedence over a trailing
    /// `$`; an empty event or property name falls back to interpolation.
    pub fn classify(attr_name: &str) -> Self {
        if let Some(event) = attr_name.strip_prefix("on-").filter(|e| !e.is_empty()) {
            return AttributeKind::Event {
                event_name: dash_case_to_camel_case(event),
            };
        }
        if let Some(prop) = attr_name.strip_suffix('$').filter(|p| !p.is_empty()) {
            return AttributeKind::Property {
                prop_name: dash_case_to_camel_case(prop),
            };
        }
        AttributeKind::Interpolation
    }
}

/// Placeholders found in one attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBinding {
    /// Names in scan order. Event and property bindings only use the first.
    pub names: Vec<String>,
    pub attr_name: String,
    pub path: Path,
    pub kind: AttributeKind,
}

impl AttributeBinding {
    pub fn event_name(&self) -> Option<&str> {
        match &self.kind {
            AttributeKind::Event { event_name } => Some(event_name),
            _ => None,
        }
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, AttributeKind::Property { .. })
    }
}

/// Binding descriptors of one parsed template.
///
/// Built once by [`crate::parse`], never mutated afterwards, and applied to
/// any number of clones of the same template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    syntax: Syntax,
    text_bindings: Vec<TextBinding>,
    attribute_bindings: Vec<AttributeBinding>,
    #[serde(skip)]
    matcher: OnceCell<Matcher>,
}

impl Schema {
    pub(crate) fn new(syntax: Syntax) -> Self {
        Self {
            syntax,
            ..Self::default()
        }
    }

    pub(crate) fn add_text_binding(&mut self, name: &str, path: Path) {
        trace!(binding = name, %path, "text binding");
        self.text_bindings.push(TextBinding {
            name: name.to_string(),
            path,
        });
    }

    pub(crate) fn add_attribute_binding(
        &mut self,
        names: Vec<String>,
        attr_name: &str,
        path: Path,
    ) {
        let kind = AttributeKind::classify(attr_name);
        trace!(?names, attr_name, %path, ?kind, "attribute binding");
        self.attribute_bindings.push(AttributeBinding {
            names,
            attr_name: attr_name.to_string(),
            path,
            kind,
        });
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    pub fn text_bindings(&self) -> &[TextBinding] {
        &self.text_bindings
    }

    pub fn attribute_bindings(&self) -> &[AttributeBinding] {
        &self.attribute_bindings
    }

    /// Total number of descriptors.
    pub fn len(&self) -> usize {
        self.text_bindings.len() + self.attribute_bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Binds a clone of the parsed template.
    ///
    /// Placeholder text nodes are emptied, event and property attributes are
    /// removed, interpolated attributes are rendered with every name empty.
    /// `root` must have the same shape as the parsed template content.
    pub fn apply_to(&self, root: &Node) -> Result<TemplateBindings, BindError> {
        let matcher = self.matcher.get_or_try_init(|| self.syntax.matcher())?;
        let mut bindings = TemplateBindings::new(matcher.clone());

        for TextBinding { name, path } in &self.text_bindings {
            let node = path.resolve(root)?;
            expect_kind(&node, path, NodeKind::Text, "a text node")?;
            node.set_text_content("");
            bindings.register([name.as_str()], BoundNode::Text { node });
        }

        for binding in &self.attribute_bindings {
            let path = &binding.path;
            let element = path.resolve(root)?;
            expect_kind(&element, path, NodeKind::Element, "an element")?;
            let original_value = element.get_attribute(&binding.attr_name).ok_or_else(|| {
                BindError::MissingAttribute {
                    path: path.clone(),
                    attr: binding.attr_name.clone(),
                }
            })?;
            let first = binding.names.first().map(String::as_str);

            match &binding.kind {
                AttributeKind::Event { event_name } => {
                    element.remove_attribute(&binding.attr_name);
                    bindings.register(
                        first,
                        BoundNode::EventHandler {
                            element,
                            event_name: event_name.clone(),
                            handler: None,
                        },
                    );
                }
                AttributeKind::Property { prop_name } => {
                    element.remove_attribute(&binding.attr_name);
                    bindings.register(
                        first,
                        BoundNode::Property {
                            element,
                            prop_name: prop_name.clone(),
                        },
                    );
                }
                AttributeKind::Interpolation => {
                    let values: IndexMap<String, String> = binding
                        .names
                        .iter()
                        .map(|name| (name.clone(), String::new()))
                        .collect();
                    element.set_attribute(
                        binding.attr_name.as_str(),
                        matcher.render(&original_value, &values),
                    )?;
                    bindings.register(
                        binding.names.iter().map(String::as_str),
                        BoundNode::Attribute {
                            element,
                            attr_name: binding.attr_name.clone(),
                            original_value,
                            values,
                        },
                    );
                }
            }
        }

        trace!(names = bindings.len(), "instance bound");
        Ok(bindings)
    }
}

fn expect_kind(
    node: &Node,
    path: &Path,
    kind: NodeKind,
    expected: &'static str,
) -> Result<(), BindError> {
    let found = node.kind();
    if found == kind {
        Ok(())
    } else {
        Err(BindError::KindMismatch {
            path: path.clone(),
            expected,
            found,
        })
    }
}
