//! Template definition validation.
//!
//! Validation fails fast: templates are checked in list order, each one
//! field by field (`id`, `title`, `schemaType`, `value`), and only then are ids
//! checked for uniqueness across the whole list.

use std::collections::HashMap;

use crate::error::{ValidationError, ValidationResult};
use crate::template::Template;

/// Validate a whole list of template definitions.
pub fn validate_templates(templates: &[Template]) -> ValidationResult<()> {
    for (index, template) in templates.iter().enumerate() {
        validate_template(template, index)?;
    }
    validate_unique_ids(templates)
}

/// Validate a single template definition found at `index`.
pub fn validate_template(template: &Template, index: usize) -> ValidationResult<()> {
    if template.id.is_empty() {
        return Err(ValidationError::MissingId { index });
    }

    let label = format!("\"{}\"", template.id);

    if template.title.is_empty() {
        return Err(ValidationError::MissingTitle { index, label });
    }

    if template.schema_type.is_empty() {
        return Err(ValidationError::MissingSchemaType { index, label });
    }

    match template.value_shape() {
        None => Err(ValidationError::MissingValue { index, label }),
        Some(shape) if !shape.is_resolvable() => {
            Err(ValidationError::InvalidValue { index, label })
        }
        Some(_) => Ok(()),
    }
}

fn validate_unique_ids(templates: &[Template]) -> ValidationResult<()> {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (index, template) in templates.iter().enumerate() {
        if let Some(&first_index) = seen.get(template.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: template.id.clone(),
                index,
                first_index,
            });
        }
        seen.insert(&template.id, index);
    }

    Ok(())
}
