//! Initial value resolution.
//!
//! Resolving a template:
//! - extracts its `value`, calling the resolver if it is one (and awaiting
//!   it only when the resolver defers),
//! - checks that a top-level `_type` agrees with the template's schema type,
//! - normalizes the resulting tree (see [`crate::normalize`]).
//!
//! Any failure aborts the whole resolution; no partial value is returned.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::InvalidTemplateError;
use crate::normalize::{normalize_initial_value, TYPE_FIELD};
use crate::template::{Template, TemplateValue, ValueShape};

/// Resolve a template's initial value using the template's own `params`.
pub async fn resolve_initial_value(template: &Template) -> Result<Value, InvalidTemplateError> {
    resolve_initial_value_with_params(template, template.params.as_ref()).await
}

/// Resolve a template's initial value, handing `params` to a resolver.
pub async fn resolve_initial_value_with_params(
    template: &Template,
    params: Option<&Value>,
) -> Result<Value, InvalidTemplateError> {
    let id = template.id.as_str();
    debug!("Resolving initial value for template '{}'", id);

    let value = match &template.value {
        None => {
            return Err(InvalidTemplateError::MissingValue { id: id.to_string() });
        }
        Some(TemplateValue::Static(value)) => match ValueShape::of(value) {
            ValueShape::Object => value.clone(),
            _ => {
                return Err(InvalidTemplateError::InvalidValue { id: id.to_string() });
            }
        },
        Some(TemplateValue::Resolver(resolver)) => resolver
            .call(params)
            .settle()
            .await
            .map_err(|source| InvalidTemplateError::ResolverFailed {
                id: id.to_string(),
                source,
            })?,
    };

    let mut root = match value {
        Value::Object(map) => map,
        _ => return Err(InvalidTemplateError::NonObject { id: id.to_string() }),
    };

    check_root_type(template, &root)?;

    let stats = normalize_initial_value(id, &mut root)?;
    debug!(
        "Resolved template '{}': {} keys assigned, {} references stamped",
        id, stats.keys_assigned, stats.references_stamped
    );

    Ok(Value::Object(root))
}

fn check_root_type(
    template: &Template,
    root: &Map<String, Value>,
) -> Result<(), InvalidTemplateError> {
    let found = match root.get(TYPE_FIELD) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(found)) if found.is_empty() || *found == template.schema_type => {
            return Ok(())
        }
        Some(Value::String(found)) => found.clone(),
        Some(other) => other.to_string(),
    };

    Err(InvalidTemplateError::TypeMismatch {
        id: template.id.clone(),
        found,
        schema_type: template.schema_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn author(value: impl Into<TemplateValue>) -> Template {
        Template::new("author", "Author", "author", value)
    }

    #[tokio::test]
    async fn test_static_value() {
        let value = resolve_initial_value(&author(json!({"title": "here"})))
            .await
            .unwrap();
        assert_eq!(value, json!({"title": "here"}));
    }

    #[tokio::test]
    async fn test_matching_root_type_is_accepted() {
        let value = resolve_initial_value(&author(json!({"_type": "author", "name": "x"})))
            .await
            .unwrap();
        assert_eq!(value["_type"], json!("author"));
    }

    #[tokio::test]
    async fn test_non_string_root_type() {
        let err = resolve_initial_value(&author(json!({"_type": 42})))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Template \"author\" initial value: includes \"_type\"-property (42) that does not match template (author)"
        );
    }

    #[tokio::test]
    async fn test_empty_or_null_root_type_is_ignored() {
        let value = resolve_initial_value(&author(json!({"_type": "", "name": "x"})))
            .await
            .unwrap();
        assert_eq!(value["name"], json!("x"));

        assert!(resolve_initial_value(&author(json!({"_type": null})))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_primitive_value_rejected() {
        let err = resolve_initial_value(&author(json!("nope")))
            .await
            .unwrap_err();
        assert!(matches!(err, InvalidTemplateError::InvalidValue { .. }));
    }

    #[tokio::test]
    async fn test_explicit_params_override() {
        let template = author(TemplateValue::from_fn(|params| {
            json!({"name": params.and_then(|p| p.get("name")).cloned()})
        }))
        .with_params(json!({"name": "template"}));

        let value = resolve_initial_value(&template).await.unwrap();
        assert_eq!(value, json!({"name": "template"}));

        let params = json!({"name": "caller"});
        let value = resolve_initial_value_with_params(&template, Some(&params))
            .await
            .unwrap();
        assert_eq!(value, json!({"name": "caller"}));
    }

    #[tokio::test]
    async fn test_async_resolver_failure() {
        let template = author(TemplateValue::from_async(|_| async {
            Err::<Value, _>(anyhow::anyhow!("backend unavailable"))
        }));

        let err = resolve_initial_value(&template).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Template \"author\" initial value: resolver failed: backend unavailable"
        );
    }
}
