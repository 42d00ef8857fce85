//! Initial value normalization.
//!
//! Walks a resolved value depth-first and
//! - stamps `_type: "reference"` on objects that carry `_ref` but no `_type`,
//! - gives every object element of an array a `_key` if it has none,
//! - rejects nested objects that declare no `_type`.
//!
//! The root object is identified by the template's schema type and is exempt
//! from the `_type` requirement.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::InvalidTemplateError;
use crate::keys::KeyGenerator;

pub const TYPE_FIELD: &str = "_type";
pub const KEY_FIELD: &str = "_key";
pub const REF_FIELD: &str = "_ref";
pub const REFERENCE_TYPE: &str = "reference";

/// A marker field counts as declared only when it holds a non-empty string.
fn declared_marker<'v>(map: &'v Map<String, Value>, field: &str) -> Option<&'v str> {
    match map.get(field) {
        Some(Value::String(marker)) if !marker.is_empty() => Some(marker),
        _ => None,
    }
}

fn is_reference_shorthand(map: &Map<String, Value>) -> bool {
    map.get(REF_FIELD).is_some_and(|r| !r.is_null())
}

/// One step from the root to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

fn render_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// What a normalization pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub keys_assigned: usize,
    pub references_stamped: usize,
}

impl NormalizeStats {
    pub fn is_noop(&self) -> bool {
        self.keys_assigned == 0 && self.references_stamped == 0
    }
}

/// Normalize the root object of a resolved initial value in place.
pub fn normalize_initial_value(
    template_id: &str,
    root: &mut Map<String, Value>,
) -> Result<NormalizeStats, InvalidTemplateError> {
    let mut normalizer = Normalizer::new(template_id);
    let mut path = Vec::new();
    normalizer.visit_members(root, &mut path)?;
    Ok(normalizer.stats)
}

struct Normalizer<'a> {
    template_id: &'a str,
    keys: KeyGenerator,
    stats: NormalizeStats,
}

impl<'a> Normalizer<'a> {
    fn new(template_id: &'a str) -> Self {
        Self {
            template_id,
            keys: KeyGenerator::new(),
            stats: NormalizeStats::default(),
        }
    }

    fn visit(
        &mut self,
        value: &mut Value,
        path: &mut Vec<PathSegment>,
    ) -> Result<(), InvalidTemplateError> {
        match value {
            Value::Object(map) => self.visit_object(map, path),
            Value::Array(items) => self.visit_array(items, path),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
        }
    }

    fn visit_object(
        &mut self,
        map: &mut Map<String, Value>,
        path: &mut Vec<PathSegment>,
    ) -> Result<(), InvalidTemplateError> {
        if declared_marker(map, TYPE_FIELD).is_none() {
            if is_reference_shorthand(map) {
                map.insert(TYPE_FIELD.to_string(), Value::from(REFERENCE_TYPE));
                self.stats.references_stamped += 1;
            } else {
                return Err(InvalidTemplateError::MissingType {
                    id: self.template_id.to_string(),
                    path: render_path(path),
                });
            }
        }

        self.visit_members(map, path)
    }

    fn visit_members(
        &mut self,
        map: &mut Map<String, Value>,
        path: &mut Vec<PathSegment>,
    ) -> Result<(), InvalidTemplateError> {
        for (key, child) in map.iter_mut() {
            path.push(PathSegment::Key(key.clone()));
            self.visit(child, path)?;
            path.pop();
        }
        Ok(())
    }

    fn visit_array(
        &mut self,
        items: &mut [Value],
        path: &mut Vec<PathSegment>,
    ) -> Result<(), InvalidTemplateError> {
        for item in items.iter() {
            if let Some(key) = item.as_object().and_then(|map| declared_marker(map, KEY_FIELD)) {
                self.keys.reserve(key);
            }
        }

        for (index, item) in items.iter_mut().enumerate() {
            if let Value::Object(map) = item {
                if declared_marker(map, KEY_FIELD).is_none() {
                    map.insert(KEY_FIELD.to_string(), Value::from(self.keys.next_key()));
                    self.stats.keys_assigned += 1;
                }
            }

            path.push(PathSegment::Index(index));
            self.visit(item, path)?;
            path.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_stamps_references() {
        let mut value = root(json!({"author": {"_ref": "grrm"}}));
        let stats = normalize_initial_value("book", &mut value).unwrap();
        assert_eq!(value["author"], json!({"_ref": "grrm", "_type": "reference"}));
        assert_eq!(stats.references_stamped, 1);
        assert_eq!(stats.keys_assigned, 0);
    }

    #[test]
    fn test_missing_type_path_through_arrays() {
        let mut value = root(json!({
            "meta": [{"_type": "holder", "author": {"name": "x"}}]
        }));
        let err = normalize_initial_value("book", &mut value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Template \"book\" initial value: missing \"_type\" property at path \"meta.0.author\""
        );
    }

    #[test]
    fn test_untyped_array_item_is_rejected() {
        let mut value = root(json!({"tags": [{"label": "x"}]}));
        let err = normalize_initial_value("book", &mut value).unwrap_err();
        assert!(matches!(
            err,
            InvalidTemplateError::MissingType { ref path, .. } if path == "tags.0"
        ));
    }

    #[test]
    fn test_existing_keys_are_kept() {
        let mut value = root(json!({
            "items": [{"_type": "item", "_key": "keep-me-123"}, {"_type": "item"}]
        }));
        let stats = normalize_initial_value("list", &mut value).unwrap();
        assert_eq!(value["items"][0]["_key"], json!("keep-me-123"));
        assert!(value["items"][1]["_key"].is_string());
        assert_ne!(value["items"][1]["_key"], json!("keep-me-123"));
        assert_eq!(stats.keys_assigned, 1);
    }

    #[test]
    fn test_scalar_arrays_untouched() {
        let mut value = root(json!({"tags": ["a", "b"], "matrix": [[1, 2], [3]]}));
        let stats = normalize_initial_value("list", &mut value).unwrap();
        assert_eq!(value["tags"], json!(["a", "b"]));
        assert_eq!(value["matrix"], json!([[1, 2], [3]]));
        assert!(stats.is_noop());
    }

    #[test]
    fn test_renormalizing_is_noop() {
        let mut value = root(json!({
            "categories": [{"_ref": "php"}, {"_ref": "js"}],
            "image": {"_type": "image", "asset": {"_ref": "img"}}
        }));
        normalize_initial_value("post", &mut value).unwrap();
        let once = value.clone();

        let stats = normalize_initial_value("post", &mut value).unwrap();
        assert!(stats.is_noop());
        assert_eq!(value, once);
    }

    #[test]
    fn test_null_type_is_missing() {
        let mut value = root(json!({"meta": {"_type": null, "x": 1}}));
        let err = normalize_initial_value("book", &mut value).unwrap_err();
        assert!(matches!(
            err,
            InvalidTemplateError::MissingType { ref path, .. } if path == "meta"
        ));

        let mut value = root(json!({"meta": {"_type": "", "x": 1}}));
        assert!(normalize_initial_value("book", &mut value).is_err());
    }

    #[test]
    fn test_null_ref_is_not_a_reference() {
        let mut value = root(json!({"author": {"_ref": null}}));
        let err = normalize_initial_value("book", &mut value).unwrap_err();
        assert!(matches!(
            err,
            InvalidTemplateError::MissingType { ref path, .. } if path == "author"
        ));
    }

    #[test]
    fn test_reference_with_null_type_is_stamped() {
        let mut value = root(json!({"author": {"_ref": "grrm", "_type": null}}));
        normalize_initial_value("book", &mut value).unwrap();
        assert_eq!(value["author"]["_type"], json!("reference"));
    }

    #[test]
    fn test_null_and_empty_keys_are_replaced() {
        let mut value = root(json!({
            "items": [
                {"_type": "item", "_key": null},
                {"_type": "item", "_key": ""},
                {"_type": "item", "_key": 7}
            ]
        }));
        let stats = normalize_initial_value("list", &mut value).unwrap();
        assert_eq!(stats.keys_assigned, 3);
        for item in value["items"].as_array().unwrap() {
            assert!(crate::keys::is_valid_key(item["_key"].as_str().unwrap()));
        }
    }

    #[test]
    fn test_render_path() {
        let path = vec![
            PathSegment::Key("meta".into()),
            PathSegment::Index(3),
            PathSegment::Key("author".into()),
        ];
        assert_eq!(render_path(&path), "meta.3.author");
        assert_eq!(render_path(&[]), "");
    }
}
