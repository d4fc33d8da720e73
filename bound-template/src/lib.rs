//! Parse-once templates with named bindings.
//!
//! A [`BoundTemplate`] scans its template for `{{name}}` placeholders the
//! first time an instance is requested and keeps the result as a [`Schema`]
//! of path-addressed descriptors. Every [`BoundTemplate::create`] clones the
//! template content, resolves those paths in the clone and hands back a
//! [`TemplateBindings`] whose [`set`](TemplateBindings::set) updates every
//! position bound to a name:
//!
//! * text placeholders replace a whole text node,
//! * attribute placeholders are interpolated into the attribute value,
//! * `on-<event>` attributes become event listeners,
//! * `<prop>$` attributes become property slots.

mod bindings;
mod bound_node;
mod error;
mod parser;
mod path;
mod schema;
pub mod syntax;
mod template;
mod value;

pub use bindings::{Properties, PropertyBag, TemplateBindings};
pub use bound_node::BoundNode;
pub use error::BindError;
pub use parser::parse;
pub use path::Path;
pub use schema::{AttributeBinding, AttributeKind, Schema, TextBinding};
pub use syntax::Syntax;
pub use template::{BoundTemplate, Instance};
pub use value::{Record, Value};

pub use bound_dom;
