//! Template definitions.
//!
//! A template is a named, schema-typed recipe for producing the initial value
//! of a new document. Its `value` is either a static object or a resolver that
//! computes the object, synchronously or asynchronously.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Shape of a supplied value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Object,
    Callable,
    Array,
    Primitive,
    Null,
}

impl ValueShape {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueShape::Object,
            Value::Array(_) => ValueShape::Array,
            Value::Null => ValueShape::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => ValueShape::Primitive,
        }
    }

    /// Whether a template `value` of this shape can be resolved.
    pub fn is_resolvable(self) -> bool {
        matches!(self, ValueShape::Object | ValueShape::Callable)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueShape::Object => "object",
            ValueShape::Callable => "resolver",
            ValueShape::Array => "array",
            ValueShape::Primitive => "primitive",
            ValueShape::Null => "null",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a resolver hands back: a value right away, or one still being computed.
pub enum ResolverOutput {
    Ready(Value),
    Deferred(BoxFuture<'static, anyhow::Result<Value>>),
}

impl ResolverOutput {
    /// Wait for the value, suspending only for deferred output.
    pub async fn settle(self) -> anyhow::Result<Value> {
        match self {
            ResolverOutput::Ready(value) => Ok(value),
            ResolverOutput::Deferred(future) => future.await,
        }
    }
}

impl fmt::Debug for ResolverOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverOutput::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            ResolverOutput::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Computes a template's initial value from optional parameters.
pub trait ValueResolver: Send + Sync {
    fn call(&self, params: Option<&Value>) -> ResolverOutput;
}

impl<F> ValueResolver for F
where
    F: Fn(Option<&Value>) -> ResolverOutput + Send + Sync,
{
    fn call(&self, params: Option<&Value>) -> ResolverOutput {
        self(params)
    }
}

/// The `value` of a template.
#[derive(Clone)]
pub enum TemplateValue {
    /// A value as supplied by configuration. Any JSON shape is accepted here;
    /// only objects pass validation.
    Static(Value),
    Resolver(Arc<dyn ValueResolver>),
}

impl TemplateValue {
    /// Wrap a synchronous resolver function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Value + Send + Sync + 'static,
    {
        TemplateValue::Resolver(Arc::new(move |params: Option<&Value>| {
            ResolverOutput::Ready(f(params))
        }))
    }

    /// Wrap an asynchronous resolver function.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        TemplateValue::Resolver(Arc::new(move |params: Option<&Value>| {
            ResolverOutput::Deferred(f(params).boxed())
        }))
    }

    pub fn from_resolver(resolver: impl ValueResolver + 'static) -> Self {
        TemplateValue::Resolver(Arc::new(resolver))
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            TemplateValue::Static(value) => ValueShape::of(value),
            TemplateValue::Resolver(_) => ValueShape::Callable,
        }
    }
}

impl From<Value> for TemplateValue {
    fn from(value: Value) -> Self {
        TemplateValue::Static(value)
    }
}

impl fmt::Debug for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Static(value) => f.debug_tuple("Static").field(value).finish(),
            TemplateValue::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for TemplateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(TemplateValue::Static)
    }
}

/// An initial value template.
///
/// Missing string fields deserialize as empty strings; registry validation
/// reports them as missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique template identifier
    #[serde(default)]
    pub id: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Name of the schema type the produced document has
    #[serde(default)]
    pub schema_type: String,
    /// Static value or resolver
    #[serde(default)]
    pub value: Option<TemplateValue>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Parameters handed to a resolver
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Template {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        schema_type: impl Into<String>,
        value: impl Into<TemplateValue>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            schema_type: schema_type.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn without_value(mut self) -> Self {
        self.value = None;
        self
    }

    /// Shape of the `value` field, if present.
    pub fn value_shape(&self) -> Option<ValueShape> {
        self.value.as_ref().map(TemplateValue::shape)
    }
}

/// Anything that can produce a template definition on demand.
pub trait SerializeTemplate: Send + Sync {
    fn serialize(&self) -> Template;
}

impl SerializeTemplate for Template {
    fn serialize(&self) -> Template {
        self.clone()
    }
}

/// Fluent builder for templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    spec: Template,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder from an existing definition.
    pub fn from_template(template: Template) -> Self {
        Self { spec: template }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.spec.id = id.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.spec.title = title.into();
        self
    }

    pub fn schema_type(mut self, schema_type: impl Into<String>) -> Self {
        self.spec.schema_type = schema_type.into();
        self
    }

    pub fn value(mut self, value: impl Into<TemplateValue>) -> Self {
        self.spec.value = Some(value.into());
        self
    }

    pub fn params(mut self, params: Value) -> Self {
        self.spec.params = Some(params);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.spec.icon = Some(icon.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = Some(description.into());
        self
    }
}

impl SerializeTemplate for TemplateBuilder {
    fn serialize(&self) -> Template {
        self.spec.clone()
    }
}

/// One item of a registry source.
pub enum TemplateEntry {
    Template(Template),
    Builder(Box<dyn SerializeTemplate>),
}

impl TemplateEntry {
    pub fn into_template(self) -> Template {
        match self {
            TemplateEntry::Template(template) => template,
            TemplateEntry::Builder(builder) => builder.serialize(),
        }
    }
}

impl From<Template> for TemplateEntry {
    fn from(template: Template) -> Self {
        TemplateEntry::Template(template)
    }
}

impl From<TemplateBuilder> for TemplateEntry {
    fn from(builder: TemplateBuilder) -> Self {
        TemplateEntry::Builder(Box::new(builder))
    }
}

impl fmt::Debug for TemplateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateEntry::Template(template) => {
                f.debug_tuple("Template").field(template).finish()
            }
            TemplateEntry::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_shape() {
        assert_eq!(ValueShape::of(&json!({})), ValueShape::Object);
        assert_eq!(ValueShape::of(&json!([])), ValueShape::Array);
        assert_eq!(ValueShape::of(&json!(null)), ValueShape::Null);
        assert_eq!(ValueShape::of(&json!("x")), ValueShape::Primitive);
        assert_eq!(ValueShape::of(&json!(1)), ValueShape::Primitive);
        assert!(!ValueShape::Array.is_resolvable());
        assert!(ValueShape::Callable.is_resolvable());
    }

    #[test]
    fn test_template_from_yaml() {
        let template: Template = serde_yaml::from_str(
            r#"
id: author
title: Author
schemaType: author
value:
  title: here
params:
  locale: en
"#,
        )
        .unwrap();
        assert_eq!(template.schema_type, "author");
        assert_eq!(template.value_shape(), Some(ValueShape::Object));
        assert_eq!(template.params, Some(json!({"locale": "en"})));
    }

    #[test]
    fn test_template_missing_fields() {
        let template: Template = serde_json::from_value(json!({"title": "Author"})).unwrap();
        assert!(template.id.is_empty());
        assert!(template.schema_type.is_empty());
        assert!(template.value.is_none());
    }

    #[test]
    fn test_builder_serialize() {
        let builder = TemplateBuilder::new()
            .id("developer")
            .title("Developer")
            .schema_type("developer")
            .value(json!({"title": "Foo"}))
            .icon("code");

        let template = TemplateEntry::from(builder).into_template();
        assert_eq!(template.id, "developer");
        assert_eq!(template.icon.as_deref(), Some("code"));
        assert_eq!(template.value_shape(), Some(ValueShape::Object));
    }

    #[test]
    fn test_resolver_shape() {
        let value = TemplateValue::from_fn(|_| json!({"title": "here"}));
        assert_eq!(value.shape(), ValueShape::Callable);
    }

    struct Greeting {
        text: &'static str,
    }

    impl ValueResolver for Greeting {
        fn call(&self, params: Option<&Value>) -> ResolverOutput {
            let name = params
                .and_then(|p| p.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("world");
            ResolverOutput::Ready(json!({"text": format!("{}, {}", self.text, name)}))
        }
    }

    #[tokio::test]
    async fn test_struct_resolver() {
        let value = TemplateValue::from_resolver(Greeting { text: "hello" });
        assert_eq!(value.shape(), ValueShape::Callable);

        let TemplateValue::Resolver(resolver) = value else {
            panic!("expected a resolver");
        };
        let params = json!({"name": "ada"});
        let resolved = resolver.call(Some(&params)).settle().await.unwrap();
        assert_eq!(resolved, json!({"text": "hello, ada"}));
    }
}
