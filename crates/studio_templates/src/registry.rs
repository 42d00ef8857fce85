//! Template registry.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::{TemplateError, TemplateResult, ValidationResult};
use crate::resolver::resolve_initial_value_with_params;
use crate::schema::Schema;
use crate::template::{Template, TemplateEntry};
use crate::validate::validate_templates;

/// Serialize and validate a template source.
///
/// With no source the built-in defaults are returned, which is an empty list
/// when no schema is involved. An empty source is valid and stays empty.
pub fn get_templates(source: Option<Vec<TemplateEntry>>) -> ValidationResult<Vec<Template>> {
    get_templates_for_schema(&Schema::default(), source)
}

/// Like [`get_templates`], with defaults derived from the document types of
/// `schema`.
pub fn get_templates_for_schema(
    schema: &Schema,
    source: Option<Vec<TemplateEntry>>,
) -> ValidationResult<Vec<Template>> {
    let templates = match source {
        Some(entries) => entries
            .into_iter()
            .map(TemplateEntry::into_template)
            .collect(),
        None => {
            debug!("No template source configured, using schema defaults");
            schema.default_templates()
        }
    };

    validate_templates(&templates)?;
    debug!("Accepted {} template(s)", templates.len());
    Ok(templates)
}

/// Validated templates, indexed by id and kept in source order.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
    index: HashMap<String, usize>,
}

impl TemplateRegistry {
    /// Build a registry from a source, validating every definition.
    pub fn from_source(
        schema: &Schema,
        source: Option<Vec<TemplateEntry>>,
    ) -> ValidationResult<Self> {
        let templates = get_templates_for_schema(schema, source)?;
        Ok(Self::from_validated(templates))
    }

    fn from_validated(templates: Vec<Template>) -> Self {
        let index = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
        Self { templates, index }
    }

    /// Get a template by ID.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    /// Get a template by ID, returning an error if not found.
    pub fn get_required(&self, id: &str) -> TemplateResult<&Template> {
        self.get(id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All templates in source order.
    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    /// Templates producing documents of `schema_type`.
    pub fn for_schema_type(&self, schema_type: &str) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| t.schema_type == schema_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Resolve the initial value of a registered template.
    ///
    /// `params` replaces the template's own parameters when given.
    pub async fn resolve(&self, id: &str, params: Option<&Value>) -> TemplateResult<Value> {
        let template = self.get_required(id)?;
        let params = params.or(template.params.as_ref());
        Ok(resolve_initial_value_with_params(template, params).await?)
    }
}
