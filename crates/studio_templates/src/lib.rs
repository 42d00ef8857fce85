//! # studio_templates
//!
//! Initial value templates for the studio.
//!
//! A template is a named, schema-typed recipe for the initial value of a new
//! document. This crate:
//!
//! - loads template definitions from configuration and validates them
//! - resolves a template's value (static object, sync or async resolver)
//! - normalizes the result: reference shorthand gets `_type: "reference"`,
//!   array items get a random `_key`, nested objects must declare `_type`
//! - builds intent links for creating documents from templates
//!
//! ## Example
//!
//! ```rust,no_run
//! use studio_templates::{resolve_initial_value, Schema, TemplateLoader};
//!
//! # async fn run() -> studio_templates::TemplateResult<()> {
//! let loader = TemplateLoader::new("templates");
//! let registry = loader.load_registry(&Schema::default())?;
//!
//! let template = registry.get_required("author")?;
//! let value = resolve_initial_value(template).await?;
//! println!("{}", value);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod intent;
pub mod keys;
pub mod loader;
pub mod normalize;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod template;
pub mod validate;

pub use error::{
    InvalidTemplateError, TemplateError, TemplateResult, ValidationError, ValidationResult,
};
pub use intent::{
    create_document_link, resolve_intent_link, IntentParameters, IntentRouter, CREATE_INTENT,
};
pub use keys::{is_valid_key, KeyGenerator};
pub use loader::TemplateLoader;
pub use normalize::{normalize_initial_value, NormalizeStats, PathSegment};
pub use registry::{get_templates, get_templates_for_schema, TemplateRegistry};
pub use resolver::{resolve_initial_value, resolve_initial_value_with_params};
pub use schema::{Schema, SchemaType, SchemaTypeKind};
pub use template::{
    ResolverOutput, SerializeTemplate, Template, TemplateBuilder, TemplateEntry, TemplateValue,
    ValueResolver, ValueShape,
};
pub use validate::{validate_template, validate_templates};
