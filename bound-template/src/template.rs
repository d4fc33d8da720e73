use bound_dom::{Node, Template};
use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::bindings::TemplateBindings;
use crate::error::BindError;
use crate::parser::parse;
use crate::schema::Schema;
use crate::syntax::Syntax;
use crate::value::Value;

/// A fresh clone of the template content and the bindings that drive it.
pub type Instance = (Node, TemplateBindings);

/// Turns a [`Template`] into a factory of bound instances.
///
/// The template is parsed on the first [`create`](Self::create) and the
/// resulting [`Schema`] is reused for every later instance. Changing the
/// template's markup after that is not picked up.
#[derive(Debug)]
pub struct BoundTemplate {
    template: Template,
    syntax: Syntax,
    schema: OnceCell<Schema>,
}

impl BoundTemplate {
    pub fn new(template: Template) -> Self {
        Self::with_syntax(template, Syntax::default())
    }

    pub fn with_syntax(template: Template, syntax: Syntax) -> Self {
        Self {
            template,
            syntax,
            schema: OnceCell::new(),
        }
    }

    pub fn from_markup(markup: &str) -> Result<Self, BindError> {
        Ok(Self::new(Template::parse(markup)?))
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// The cached schema, once the first instance has been created.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.get()
    }

    pub fn is_parsed(&self) -> bool {
        self.schema.get().is_some()
    }

    pub fn create(&self) -> Result<Instance, BindError> {
        let schema = self.schema.get_or_try_init(|| {
            let schema = parse(self.template.content(), &self.syntax)?;
            debug!(descriptors = schema.len(), "schema cached");
            Ok::<_, BindError>(schema)
        })?;
        let instance = self.template.instantiate();
        let bindings = schema.apply_to(&instance)?;
        Ok((instance, bindings))
    }

    /// [`create`](Self::create), then [`TemplateBindings::set_data`].
    pub fn create_with<I, K, V>(&self, data: I) -> Result<Instance, BindError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let (instance, mut bindings) = self.create()?;
        bindings.set_data(data);
        Ok((instance, bindings))
    }
}

impl From<Template> for BoundTemplate {
    fn from(template: Template) -> Self {
        BoundTemplate::new(template)
    }
}
