// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Array strategies applied at declared paths of a merged document

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::arrays::{merge_array_values, ArrayStrategy};
use super::engine::merge;
use super::MergeStrategy;
use crate::document::{sequence_paths, DocPath};
use crate::error::Result;

/// Array merge rule for one sequence location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayDirective {
    /// Location of the sequence, e.g. `$.extends`
    pub path: DocPath,
    #[serde(default)]
    pub strategy: ArrayStrategy,
    /// Drop structurally equal duplicates, keeping the first occurrence
    #[serde(default, alias = "deduplicate")]
    pub dedupe: bool,
}

impl ArrayDirective {
    pub fn new(path: DocPath, strategy: ArrayStrategy, dedupe: bool) -> Self {
        Self {
            path,
            strategy,
            dedupe,
        }
    }
}

/// Array rule applied to every override sequence without its own directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArrayDefault {
    #[serde(default)]
    pub strategy: ArrayStrategy,
    #[serde(default, alias = "deduplicate")]
    pub dedupe: bool,
}

/// Merge two trees, then recombine the sequences named by `directives`
/// (and, with `default`, every other sequence the override carries).
pub fn merge_with_directives(
    base: &Value,
    overlay: &Value,
    strategy: MergeStrategy,
    directives: &[ArrayDirective],
    default: Option<ArrayDefault>,
) -> Result<Value> {
    let mut merged = merge(base, overlay, strategy);

    for directive in directives {
        combine_at(
            &mut merged,
            base,
            overlay,
            &directive.path,
            directive.strategy,
            directive.dedupe,
        )?;
    }

    if let Some(default) = default {
        for path in sequence_paths(overlay) {
            if directives.iter().any(|d| d.path == path) {
                continue;
            }
            combine_at(
                &mut merged,
                base,
                overlay,
                &path,
                default.strategy,
                default.dedupe,
            )?;
        }
    }

    Ok(merged)
}

fn combine_at(
    merged: &mut Value,
    base: &Value,
    overlay: &Value,
    path: &DocPath,
    strategy: ArrayStrategy,
    dedupe: bool,
) -> Result<()> {
    if deleted_by(overlay, path) {
        tracing::debug!("Skipping array directive at {}: deleted by override", path);
        return Ok(());
    }

    let base_items = path.get(base);
    let overlay_items = path.get(overlay);
    if base_items.is_none() && overlay_items.is_none() {
        return Ok(());
    }

    let combined = merge_array_values(base_items, overlay_items, strategy, dedupe);
    path.set(merged, Value::Array(combined))
}

/// Whether the override holds an explicit null at `path` or at one of its
/// ancestors.
fn deleted_by(overlay: &Value, path: &DocPath) -> bool {
    let mut current = overlay;
    for segment in path.segments() {
        match current.as_object().and_then(|map| map.get(segment)) {
            Some(Value::Null) => return true,
            Some(next) => current = next,
            None => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn directive(path: &str, strategy: ArrayStrategy, dedupe: bool) -> ArrayDirective {
        ArrayDirective::new(DocPath::parse(path).unwrap(), strategy, dedupe)
    }

    #[test]
    fn test_directive_appends_nested_array() {
        let base = json!({"extends": ["config:base"], "x": {"labels": ["a"]}});
        let overlay = json!({"x": {"labels": ["b", "a"]}});
        let merged = merge_with_directives(
            &base,
            &overlay,
            MergeStrategy::Deep,
            &[directive("$.x.labels", ArrayStrategy::Append, true)],
            None,
        )
        .unwrap();
        assert_eq!(merged, json!({"extends": ["config:base"], "x": {"labels": ["a", "b"]}}));
    }

    #[test]
    fn test_directive_with_missing_override_keeps_base() {
        let base = json!({"list": [1, 1, 2]});
        let merged = merge_with_directives(
            &base,
            &json!({}),
            MergeStrategy::Deep,
            &[directive("$.list", ArrayStrategy::Append, true)],
            None,
        )
        .unwrap();
        assert_eq!(merged, json!({"list": [1, 2]}));
    }

    #[test]
    fn test_directive_for_absent_path_is_noop() {
        let base = json!({"a": 1});
        let merged = merge_with_directives(
            &base,
            &json!({}),
            MergeStrategy::Deep,
            &[directive("$.nothing.here", ArrayStrategy::Append, false)],
            None,
        )
        .unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_null_override_wins_over_directive() {
        let base = json!({"a": {"list": [1]}});
        let overlay = json!({"a": null});
        let merged = merge_with_directives(
            &base,
            &overlay,
            MergeStrategy::Deep,
            &[directive("$.a.list", ArrayStrategy::Append, false)],
            None,
        )
        .unwrap();
        assert_eq!(merged, json!({}));
    }

    #[test]
    fn test_default_applies_to_undeclared_sequences() {
        let base = json!({"a": [1], "b": {"c": ["x"]}, "d": [9]});
        let overlay = json!({"a": [2], "b": {"c": ["y"]}});
        let merged = merge_with_directives(
            &base,
            &overlay,
            MergeStrategy::Deep,
            &[directive("$.a", ArrayStrategy::Prepend, false)],
            Some(ArrayDefault {
                strategy: ArrayStrategy::Append,
                dedupe: false,
            }),
        )
        .unwrap();
        assert_eq!(merged, json!({"a": [2, 1], "b": {"c": ["x", "y"]}, "d": [9]}));
    }

    #[test]
    fn test_directive_through_scalar_fails() {
        let base = json!({"a": "scalar"});
        let overlay = json!({"a": "still scalar"});
        let result = merge_with_directives(
            &base,
            &overlay,
            MergeStrategy::Deep,
            &[directive("$.a.list", ArrayStrategy::Append, false)],
            None,
        );
        // Neither side has the sequence, so nothing is written.
        assert_eq!(result.unwrap(), json!({"a": "still scalar"}));

        let base = json!({"a": {"list": [1]}});
        let overlay = json!({"a": "scalar"});
        let err = merge_with_directives(
            &base,
            &overlay,
            MergeStrategy::Deep,
            &[directive("$.a.list", ArrayStrategy::Append, false)],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::OrgMergeError::NotAMap { .. }));
    }

    #[test]
    fn test_directive_serde() {
        let d: ArrayDirective =
            serde_yaml::from_str("path: $.extends\nstrategy: prepend\ndeduplicate: true\n")
                .unwrap();
        assert_eq!(d, directive("$.extends", ArrayStrategy::Prepend, true));

        let d: ArrayDirective = serde_yaml::from_str("path: $.extends\n").unwrap();
        assert_eq!(d.strategy, ArrayStrategy::Replace);
        assert!(!d.dedupe);
    }
}
