//! Key-case normalization
//!
//! The remote API is not consistent about field casing: some handlers emit
//! PascalCase members (`ServiceName`, `Task`) where the rest of the API uses
//! camelCase. These helpers lowercase the first character of such keys so
//! the payload can be decoded into the camelCase models.

use serde_json::{Map, Value};

/// Lowercase the first letter of every PascalCase key of a JSON object
///
/// Only the top-level keys are rewritten. When both `Foo` and `foo` are
/// present, the value that came from `Foo` wins and the entry stays at the
/// position of whichever spelling appeared first.
///
/// Anything that is not an object, including `null`, is returned untouched,
/// as is an empty object.
pub fn transform_camel_case(value: Value) -> Value {
    match value {
        Value::Object(map) if !map.is_empty() => Value::Object(transform_object(map)),
        other => other,
    }
}

/// Same as [`transform_camel_case`] for an already unwrapped object
pub fn transform_object(map: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        merge_key(&mut out, key, value);
    }
    out
}

/// Returns the key with its first character lowercased, or `None` when the
/// first character is not uppercase.
pub fn lower_first(key: &str) -> Option<String> {
    let mut chars = key.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    Some(first.to_lowercase().chain(chars).collect())
}

fn merge_key(out: &mut Map<String, Value>, key: String, value: Value) {
    match lower_first(&key) {
        Some(lowered) => {
            out.insert(lowered, value);
        }
        // An already-lowercase key never replaces a normalized one.
        None if out.contains_key(&key) => {}
        None => {
            out.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lowercases_pascal_keys() {
        let out = transform_camel_case(json!({"Foo": 1, "bar": 2}));
        assert_eq!(out, json!({"foo": 1, "bar": 2}));
        assert!(out.get("Foo").is_none());
    }

    #[test]
    fn test_empty_and_null_are_returned_unchanged() {
        assert_eq!(transform_camel_case(json!({})), json!({}));
        assert_eq!(transform_camel_case(Value::Null), Value::Null);
        assert_eq!(transform_camel_case(json!([{"A": 1}])), json!([{"A": 1}]));
    }

    #[test]
    fn test_keeps_key_order() {
        let out = transform_camel_case(json!({"Zed": 1, "alpha": 2, "Mid": 3}));
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zed", "alpha", "mid"]);
    }

    #[test]
    fn test_normalized_key_wins_collision() {
        let before = transform_camel_case(json!({"Name": "upper", "name": "lower"}));
        let after = transform_camel_case(json!({"name": "lower", "Name": "upper"}));
        assert_eq!(before, json!({"name": "upper"}));
        assert_eq!(after, json!({"name": "upper"}));
    }

    #[test]
    fn test_nested_objects_are_left_alone() {
        let out = transform_camel_case(json!({"Task": {"Config": {}}}));
        assert_eq!(out, json!({"task": {"Config": {}}}));
    }

    #[test]
    fn test_lower_first_edge_cases() {
        assert_eq!(lower_first(""), None);
        assert_eq!(lower_first("already"), None);
        assert_eq!(lower_first("9lives"), None);
        assert_eq!(lower_first("X"), Some("x".to_string()));
        assert_eq!(lower_first("ÉtatFinal"), Some("étatFinal".to_string()));
    }
}
