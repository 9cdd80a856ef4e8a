// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Generic document model
//!
//! YAML and JSON documents are both read into a `serde_json::Value` tree:
//! maps (insertion ordered), sequences, scalars and explicit null. Key order
//! does not matter for equality or merging, but is kept so a merged document
//! serializes back in the order its author wrote it.

pub mod compare;
pub mod path;

pub use compare::{deep_equal, dedup};
pub use path::{sequence_paths, DocPath};

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{OrgMergeError, Result};

/// Serialization format of a structured document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from a file extension (`.yml`, `.yaml`, `.json`).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yml" | "yaml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "YAML"),
            Format::Json => write!(f, "JSON"),
        }
    }
}

/// An empty map, the value nil documents stand in for.
pub fn empty_map() -> Value {
    Value::Object(Map::new())
}

/// Parse document text into a tree.
///
/// Whitespace-only input yields an empty map rather than null.
pub fn parse_document(text: &str, format: Format) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(empty_map());
    }

    let parsed = match format {
        Format::Yaml => serde_yaml::from_str::<Value>(text).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str::<Value>(text).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| OrgMergeError::Parse {
        format: format.to_string(),
        message,
    })
}

/// Serialize a tree back to text.
///
/// JSON is pretty-printed and newline-terminated to match YAML output.
pub fn serialize_document(value: &Value, format: Format) -> Result<String> {
    match format {
        Format::Yaml => Ok(serde_yaml::to_string(value)?),
        Format::Json => {
            let mut out = serde_json::to_string_pretty(value)?;
            out.push('\n');
            Ok(out)
        }
    }
}
