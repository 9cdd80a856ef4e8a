// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Sequence merge strategies
//!
//! - `append`: base, then override
//! - `prepend`: override, then base
//! - `replace`: override only (also the fallback for unknown names)
//!
//! With deduplication on, the combined sequence keeps only the first
//! occurrence of each element, compared structurally.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::dedup;

/// How two sequences are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArrayStrategy {
    Append,
    Prepend,
    #[default]
    Replace,
}

impl ArrayStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayStrategy::Append => "append",
            ArrayStrategy::Prepend => "prepend",
            ArrayStrategy::Replace => "replace",
        }
    }

    /// Parse a strategy name. Unknown names fall back to `replace`.
    pub fn parse(name: &str) -> Self {
        match name {
            "append" => ArrayStrategy::Append,
            "prepend" => ArrayStrategy::Prepend,
            "replace" => ArrayStrategy::Replace,
            other => {
                tracing::debug!("Unknown array strategy '{}', using replace", other);
                ArrayStrategy::Replace
            }
        }
    }
}

impl From<&str> for ArrayStrategy {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for ArrayStrategy {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ArrayStrategy> for String {
    fn from(strategy: ArrayStrategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl fmt::Display for ArrayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combine two sequences. Never fails; empty inputs give an empty result.
pub fn merge_arrays(
    base: &[Value],
    overlay: &[Value],
    strategy: ArrayStrategy,
    dedupe: bool,
) -> Vec<Value> {
    let combined: Vec<Value> = match strategy {
        ArrayStrategy::Append => base.iter().chain(overlay).cloned().collect(),
        ArrayStrategy::Prepend => overlay.iter().chain(base).cloned().collect(),
        ArrayStrategy::Replace => overlay.to_vec(),
    };

    if dedupe {
        dedup(combined)
    } else {
        combined
    }
}

/// Combine two optional sequence values.
///
/// Absent values, null, and anything that is not a sequence all count as
/// an empty sequence.
pub fn merge_array_values(
    base: Option<&Value>,
    overlay: Option<&Value>,
    strategy: ArrayStrategy,
    dedupe: bool,
) -> Vec<Value> {
    merge_arrays(as_items(base), as_items(overlay), strategy, dedupe)
}

fn as_items(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}
