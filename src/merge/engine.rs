// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Structured merge of document trees
//!
//! Merge semantics for `deep` / `overlay` (RFC 7396 style):
//! - Maps: merged key by key, recursively
//! - Sequences: replaced wholesale (see `merge::arrays` for declared paths)
//! - Scalars: override wins
//! - Null in the override: deletes the key from the result
//!
//! `shallow` applies the same rules to top-level keys only; a nested map in
//! the override replaces the base map as-is.

use serde_json::{Map, Value};

use super::MergeStrategy;
use crate::document::empty_map;
use crate::error::Result;

/// Merge `overlay` onto `base` and return a new tree.
///
/// Null on either side stands for an empty map. Neither input is modified.
pub fn merge(base: &Value, overlay: &Value, strategy: MergeStrategy) -> Value {
    match (base, overlay) {
        (_, Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base.as_object(), overlay_map, strategy))
        }
        (Value::Null, Value::Null) => empty_map(),
        (_, Value::Null) => base.clone(),
        // A top-level scalar or sequence override has no keys to merge.
        (_, other) => other.clone(),
    }
}

/// Merge with a strategy given as a tag; unknown tags fail before merging.
pub fn merge_tagged(base: &Value, overlay: &Value, strategy: &str) -> Result<Value> {
    let strategy: MergeStrategy = strategy.parse()?;
    Ok(merge(base, overlay, strategy))
}

fn merge_maps(
    base: Option<&Map<String, Value>>,
    overlay: &Map<String, Value>,
    strategy: MergeStrategy,
) -> Map<String, Value> {
    let mut result = base.cloned().unwrap_or_default();

    for (key, overlay_value) in overlay {
        if overlay_value.is_null() {
            result.shift_remove(key);
            continue;
        }

        let merged = match (result.get(key), overlay_value) {
            (base_value, Value::Object(overlay_map)) if strategy.is_recursive() => {
                let base_map = base_value.and_then(Value::as_object);
                Value::Object(merge_maps(base_map, overlay_map, strategy))
            }
            _ => overlay_value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrgMergeError;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let result = merge(&json!({"timeout": 100}), &json!({"timeout": 200}), MergeStrategy::Deep);
        assert_eq!(result, json!({"timeout": 200}));
    }

    #[test]
    fn test_object_deep_merge() {
        let base = json!({"cache": {"derived": "off", "spm": "off"}});
        let overlay = json!({"cache": {"derived": "on"}});
        let result = merge(&base, &overlay, MergeStrategy::Deep);
        assert_eq!(result, json!({"cache": {"derived": "on", "spm": "off"}}));
    }

    #[test]
    fn test_array_replace() {
        let base = json!({"schemes": ["A", "B", "C"]});
        let overlay = json!({"schemes": ["X", "Y"]});
        let result = merge(&base, &overlay, MergeStrategy::Deep);
        assert_eq!(result["schemes"], json!(["X", "Y"]));
    }

    #[test]
    fn test_null_deletes_key() {
        let base = json!({"a": 1, "b": {"c": 2, "d": 3}});
        let overlay = json!({"a": null, "b": {"c": null}});
        let result = merge(&base, &overlay, MergeStrategy::Deep);
        assert_eq!(result, json!({"b": {"d": 3}}));
    }

    #[test]
    fn test_null_for_missing_key_is_noop() {
        let base = json!({"a": 1});
        let result = merge(&base, &json!({"zzz": null}), MergeStrategy::Deep);
        assert_eq!(result, base);
    }

    #[test]
    fn test_nested_nulls_stripped_from_new_maps() {
        let result = merge(
            &json!({}),
            &json!({"new": {"keep": 1, "drop": null}}),
            MergeStrategy::Deep,
        );
        assert_eq!(result, json!({"new": {"keep": 1}}));
    }

    #[test]
    fn test_shallow_replaces_nested_maps() {
        let base = json!({"cache": {"derived": "off", "spm": "off"}, "x": 1});
        let overlay = json!({"cache": {"derived": "on"}, "x": null});
        let result = merge(&base, &overlay, MergeStrategy::Shallow);
        assert_eq!(result, json!({"cache": {"derived": "on"}}));
    }

    #[test]
    fn test_overlay_matches_deep() {
        let base = json!({"a": {"b": 1, "c": [1]}, "d": "x"});
        let overlay = json!({"a": {"c": [2], "e": null}, "f": true});
        assert_eq!(
            merge(&base, &overlay, MergeStrategy::Overlay),
            merge(&base, &overlay, MergeStrategy::Deep)
        );
    }

    #[test]
    fn test_nil_inputs() {
        assert_eq!(merge(&Value::Null, &Value::Null, MergeStrategy::Deep), json!({}));
        assert_eq!(
            merge(&Value::Null, &json!({"a": 1}), MergeStrategy::Deep),
            json!({"a": 1})
        );
        assert_eq!(
            merge(&json!({"a": 1}), &Value::Null, MergeStrategy::Shallow),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_map_replaces_scalar() {
        let result = merge(&json!({"a": "text"}), &json!({"a": {"b": 1}}), MergeStrategy::Deep);
        assert_eq!(result, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_key_order_kept() {
        let base = json!({"z": 1, "a": 2, "m": 3});
        let result = merge(&base, &json!({"a": 20, "n": 4, "z": null}), MergeStrategy::Deep);
        let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "m", "n"]);
    }

    #[test]
    fn test_inputs_untouched() {
        let base = json!({"a": {"b": 1}});
        let overlay = json!({"a": {"b": null}});
        let _ = merge(&base, &overlay, MergeStrategy::Deep);
        assert_eq!(base, json!({"a": {"b": 1}}));
        assert_eq!(overlay, json!({"a": {"b": null}}));
    }

    #[test]
    fn test_merge_tagged_unknown_strategy() {
        let err = merge_tagged(&json!({}), &json!({}), "union").unwrap_err();
        assert!(matches!(err, OrgMergeError::UnknownStrategy(_)));
        assert_eq!(
            merge_tagged(&json!({"a": 1}), &json!({"b": 2}), "overlay").unwrap(),
            json!({"a": 1, "b": 2})
        );
    }
}
