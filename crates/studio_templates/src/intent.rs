//! Intent links.
//!
//! An intent names something the user wants to do ("create", "edit") along
//! with parameters, leaving it to a router to turn that into a location. Used
//! here to link to the creation of a new document from a template.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::template::Template;

/// Intent used to start a new document.
pub const CREATE_INTENT: &str = "create";

/// Parameters of an intent: plain parameters, or parameters plus a payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IntentParameters {
    Params(Map<String, Value>),
    WithPayload(Map<String, Value>, Map<String, Value>),
}

impl IntentParameters {
    /// Parameters of the `create` intent for a template.
    pub fn create_from_template(template: &Template) -> Self {
        let mut params = Map::new();
        params.insert("type".to_string(), Value::from(template.schema_type.as_str()));
        params.insert("template".to_string(), Value::from(template.id.as_str()));
        IntentParameters::Params(params)
    }

    /// Attach a payload, such as template parameters.
    pub fn with_payload(self, payload: Map<String, Value>) -> Self {
        match self {
            IntentParameters::Params(params) | IntentParameters::WithPayload(params, _) => {
                IntentParameters::WithPayload(params, payload)
            }
        }
    }

    pub fn params(&self) -> &Map<String, Value> {
        match self {
            IntentParameters::Params(params) | IntentParameters::WithPayload(params, _) => params,
        }
    }

    pub fn payload(&self) -> Option<&Map<String, Value>> {
        match self {
            IntentParameters::Params(_) => None,
            IntentParameters::WithPayload(_, payload) => Some(payload),
        }
    }
}

/// Turns intents into links.
pub trait IntentRouter {
    fn resolve_intent_link(&self, intent: &str, params: Option<&IntentParameters>) -> String;
}

/// Resolve an intent link, falling back to an inert `javascript://intent@`
/// link when no router is attached.
pub fn resolve_intent_link(
    router: Option<&dyn IntentRouter>,
    intent: &str,
    params: Option<&IntentParameters>,
) -> String {
    match router {
        Some(router) => router.resolve_intent_link(intent, params),
        None => fallback_intent_link(intent, params),
    }
}

fn fallback_intent_link(intent: &str, params: Option<&IntentParameters>) -> String {
    let descriptor = match params {
        Some(params) => json!({"intent": intent, "params": params}),
        None => json!({"intent": intent}),
    };
    format!("javascript://intent@{}", descriptor)
}

/// Link to creating a new document from `template`.
pub fn create_document_link(router: Option<&dyn IntentRouter>, template: &Template) -> String {
    let mut params = IntentParameters::create_from_template(template);
    if let Some(Value::Object(payload)) = &template.params {
        params = params.with_payload(payload.clone());
    }
    resolve_intent_link(router, CREATE_INTENT, Some(&params))
}
