//! Document schema description used to derive default templates.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::template::Template;

/// Kind of a schema type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchemaTypeKind {
    /// Top-level documents; each gets a default template
    #[default]
    Document,
    Object,
}

/// A named type in the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaType {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub kind: SchemaTypeKind,
}

impl SchemaType {
    pub fn document(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            kind: SchemaTypeKind::Document,
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            kind: SchemaTypeKind::Object,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_document(&self) -> bool {
        self.kind == SchemaTypeKind::Document
    }

    /// Title to show, falling back to the type name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// The set of types documents can be created from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub types: Vec<SchemaType>,
}

impl Schema {
    pub fn new(types: Vec<SchemaType>) -> Self {
        Self { types }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn document_types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.iter().filter(|t| t.is_document())
    }

    /// One empty-valued template per document type, in schema order.
    pub fn default_templates(&self) -> Vec<Template> {
        self.document_types()
            .map(|t| Template::new(&t.name, t.display_title(), &t.name, json!({})))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ValueShape;

    #[test]
    fn test_default_templates_skip_objects() {
        let schema = Schema::new(vec![
            SchemaType::document("author").with_title("Author"),
            SchemaType::object("address"),
            SchemaType::document("post"),
        ]);

        let templates = schema.default_templates();
        let ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["author", "post"]);
        assert_eq!(templates[0].title, "Author");
        assert_eq!(templates[1].title, "post");
        assert_eq!(templates[1].schema_type, "post");
        assert_eq!(templates[1].value_shape(), Some(ValueShape::Object));
    }

    #[test]
    fn test_schema_from_yaml() {
        let schema: Schema = serde_yaml::from_str(
            r#"
types:
  - name: author
    title: Author
  - name: address
    kind: object
"#,
        )
        .unwrap();
        assert!(schema.get("author").unwrap().is_document());
        assert!(!schema.get("address").unwrap().is_document());
        assert!(schema.get("missing").is_none());
    }

    #[test]
    fn test_empty_schema_has_no_defaults() {
        assert!(Schema::default().default_templates().is_empty());
    }
}
