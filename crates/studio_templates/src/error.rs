//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Result type alias for registry validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Structural problems found while validating a list of template definitions.
///
/// `label` is the quoted template id when one is known, otherwise
/// `at index #<n>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Template at index #{index} is missing required \"id\" property")]
    MissingId { index: usize },

    #[error("Template {label} is missing required \"title\" property")]
    MissingTitle { index: usize, label: String },

    #[error("Template {label} is missing required \"schemaType\" property")]
    MissingSchemaType { index: usize, label: String },

    #[error("Template {label} is missing required \"value\" property")]
    MissingValue { index: usize, label: String },

    #[error(
        "Template {label} has an invalid \"value\" property; must be a plain object or a resolver function"
    )]
    InvalidValue { index: usize, label: String },

    #[error(
        "Template at index #{index} has the same ID (\"{id}\") as template at index #{first_index}"
    )]
    DuplicateId {
        id: String,
        index: usize,
        first_index: usize,
    },
}

/// Failures while resolving the initial value of a single template.
#[derive(Error, Debug)]
pub enum InvalidTemplateError {
    #[error("Template \"{id}\" has invalid \"value\" property")]
    MissingValue { id: String },

    #[error(
        "Template \"{id}\" has invalid \"value\" property - must be a plain object or a resolver function"
    )]
    InvalidValue { id: String },

    #[error("Template \"{id}\" initial value: resolver failed: {source:#}")]
    ResolverFailed {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Template \"{id}\" initial value: resolved to a non-object")]
    NonObject { id: String },

    #[error(
        "Template \"{id}\" initial value: includes \"_type\"-property ({found}) that does not match template ({schema_type})"
    )]
    TypeMismatch {
        id: String,
        found: String,
        schema_type: String,
    },

    #[error("Template \"{id}\" initial value: missing \"_type\" property at path \"{path}\"")]
    MissingType { id: String, path: String },
}

/// Errors that can occur during template operations.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Invalid template file {path}: {message}")]
    InvalidFile { path: PathBuf, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidTemplate(#[from] InvalidTemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
