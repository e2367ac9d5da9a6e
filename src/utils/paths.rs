//! Dotted-path utilities for flattened control names
//!
//! Rendered controls are addressed with dotted paths (`address.zip`) so that
//! nested schemas survive flat transport. This module converts between the
//! flat map a consumer submits and the nested object shape the schemas
//! describe, and back again.

use serde_json::{Map, Value};

/// Errors that can occur while expanding dotted paths into nested data
#[derive(Debug, thiserror::Error)]
pub enum PathParseError {
    /// A path contained an empty segment, e.g. `address..zip`
    #[error("Empty segment in path '{0}'")]
    EmptySegment(String),

    /// Two paths disagree about whether a prefix holds a value or an object
    #[error("Path '{0}' conflicts with an earlier value at the same prefix")]
    Conflict(String),
}

/// Expand a flat map of dotted paths into a nested JSON object
///
/// # Arguments
/// * `entries` - Pairs of dotted path and value, e.g. `("address.zip", "8000")`
///
/// # Returns
/// A nested `Value::Object` reconstructed from the paths
pub fn expand_paths<I, S>(entries: I) -> Result<Value, PathParseError>
where
    I: IntoIterator<Item = (S, Value)>,
    S: AsRef<str>,
{
    let mut root = Map::new();

    for (path, value) in entries {
        let path = path.as_ref();
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PathParseError::EmptySegment(path.to_string()));
        }

        let mut cursor = &mut root;
        for segment in &segments[..segments.len() - 1] {
            let slot = cursor
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match slot {
                Value::Object(map) => cursor = map,
                _ => return Err(PathParseError::Conflict(path.to_string())),
            }
        }

        let leaf = segments[segments.len() - 1];
        if matches!(cursor.get(leaf), Some(Value::Object(_))) {
            return Err(PathParseError::Conflict(path.to_string()));
        }
        cursor.insert(leaf.to_string(), value);
    }

    Ok(Value::Object(root))
}

/// Flatten a nested JSON object into dotted-path entries
///
/// Inverse of [`expand_paths`] for object-shaped input. Leaf values keep
/// their JSON representation; ordering follows the object's key order.
#[must_use]
pub fn flatten_value(value: &Value) -> Vec<(String, Value)> {
    let mut entries = Vec::new();
    flatten_into(value, String::new(), &mut entries);
    entries
}

fn flatten_into(value: &Value, prefix: String, entries: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(inner, path, entries);
            }
        }
        other => entries.push((prefix, other.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expand_paths_nested() {
        let expanded = expand_paths(vec![
            ("address.zip", json!("8000")),
            ("address.street", json!("Main")),
            ("name", json!("Ada")),
        ])
        .unwrap();

        assert_eq!(
            expanded,
            json!({"address": {"zip": "8000", "street": "Main"}, "name": "Ada"})
        );
    }

    #[test]
    fn test_expand_paths_conflict() {
        let result = expand_paths(vec![("a", json!("x")), ("a.b", json!("y"))]);
        assert!(matches!(result, Err(PathParseError::Conflict(_))));
    }

    #[test]
    fn test_expand_paths_empty_segment() {
        let result = expand_paths(vec![("address..zip", json!("8000"))]);
        assert!(matches!(result, Err(PathParseError::EmptySegment(_))));
    }

    #[test]
    fn test_flatten_expand_round_trip() {
        let nested = json!({"address": {"zip": "8000", "country": {"code": "DK"}}, "name": "Ada"});
        let flat = flatten_value(&nested);
        assert_eq!(expand_paths(flat).unwrap(), nested);
    }
}
