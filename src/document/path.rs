// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Dot-addressed paths into document trees
//!
//! A path has the form `$.seg1.seg2...segN`: the `$` root sentinel followed by
//! map keys separated by dots. Paths only descend through maps; sequences are
//! addressed as a whole.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::empty_map;
use crate::error::{OrgMergeError, Result};

const ROOT: &str = "$";

/// A parsed, validated document path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// Parse a `$.a.b.c` path string.
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = || OrgMergeError::InvalidPath(path.to_string());

        let rest = path.strip_prefix(ROOT).ok_or_else(invalid)?;
        if rest.len() < 2 {
            return Err(invalid());
        }
        let rest = rest.strip_prefix('.').ok_or_else(invalid)?;

        let segments: Vec<String> = rest.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }

        Ok(Self { segments })
    }

    /// Build a path from already-split keys. Returns `None` when a key is
    /// empty or contains a dot, since such a key cannot be written as a path.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty() || s.contains('.')) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve the value at this path, if every segment exists.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Write `value` at this path, creating intermediate maps as needed.
    ///
    /// A null root or a null intermediate value counts as absent and is
    /// replaced by a map. Any other non-map value on the way is an error and
    /// leaves the tree untouched.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<()> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Err(OrgMergeError::InvalidPath(self.to_string()));
        };

        // Check the whole route first so a failed set never leaves behind
        // half-created intermediate maps.
        let mut probe = Some(&*root);
        let mut owner = ROOT;
        for segment in parents {
            match probe {
                Some(Value::Object(map)) => probe = map.get(segment),
                Some(Value::Null) | None => probe = None,
                Some(_) => return Err(self.not_a_map(owner)),
            }
            owner = segment.as_str();
        }
        if let Some(v) = probe {
            if !v.is_object() && !v.is_null() {
                return Err(self.not_a_map(owner));
            }
        }

        if root.is_null() {
            *root = empty_map();
        }
        let mut current = root;
        for segment in parents {
            let map = match current {
                Value::Object(map) => map,
                _ => return Err(self.not_a_map(segment)),
            };
            let next = map.entry(segment.clone()).or_insert_with(empty_map);
            if next.is_null() {
                *next = empty_map();
            }
            current = next;
        }

        match current {
            Value::Object(map) => {
                map.insert(last.clone(), value);
                Ok(())
            }
            _ => Err(self.not_a_map(last)),
        }
    }

    fn not_a_map(&self, segment: &str) -> OrgMergeError {
        OrgMergeError::NotAMap {
            path: self.to_string(),
            segment: segment.to_string(),
        }
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", ROOT, self.segments.join("."))
    }
}

impl FromStr for DocPath {
    type Err = OrgMergeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocPath {
    type Error = OrgMergeError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<DocPath> for String {
    fn from(path: DocPath) -> Self {
        path.to_string()
    }
}

/// Every path in `root` that holds a sequence, in document order.
///
/// Only maps are descended into. Keys that cannot be written in path syntax
/// (empty, or containing a dot) are skipped along with everything below them.
pub fn sequence_paths(root: &Value) -> Vec<DocPath> {
    let mut found = Vec::new();
    let mut prefix = Vec::new();
    collect_sequences(root, &mut prefix, &mut found);
    found
}

fn collect_sequences(value: &Value, prefix: &mut Vec<String>, found: &mut Vec<DocPath>) {
    let Value::Object(map) = value else {
        return;
    };

    for (key, child) in map {
        if key.is_empty() || key.contains('.') {
            continue;
        }
        prefix.push(key.clone());
        match child {
            Value::Array(_) => {
                if let Some(path) = DocPath::from_segments(prefix.iter().cloned()) {
                    found.push(path);
                }
            }
            Value::Object(_) => collect_sequences(child, prefix, found),
            _ => {}
        }
        prefix.pop();
    }
}
