// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for orgmerge
//!
//! This module defines all error types produced by the merge and patch engines.

use thiserror::Error;

/// Main error type for orgmerge operations
#[derive(Error, Debug)]
pub enum OrgMergeError {
    /// Merge strategy tag that is not `deep`, `shallow` or `overlay`
    #[error("Unknown merge strategy: {0}")]
    UnknownStrategy(String),

    /// Path string that does not follow the `$.seg.seg` grammar
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Tried to descend through a value that is not a map
    #[error("Path {path}: segment '{segment}' is not a map")]
    NotAMap { path: String, segment: String },

    /// Section edit missing a required field, or with an unknown action
    #[error("Invalid section operation #{index}: {reason}")]
    InvalidOperation { index: usize, reason: String },

    /// Section edit referencing a heading that is not in the document
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Settings override whose section matches nothing in the baseline
    #[error("Unresolvable override section: {0}")]
    UnresolvableSection(String),

    /// Malformed YAML or JSON document
    #[error("Failed to parse {format} document: {message}")]
    Parse { format: String, message: String },

    /// Typed structure could not be rebuilt from a merged document
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document bytes that are not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for orgmerge operations
pub type Result<T> = std::result::Result<T, OrgMergeError>;

impl OrgMergeError {
    /// Whether this error is the Markdown "section not found" kind
    pub fn is_section_not_found(&self) -> bool {
        matches!(self, OrgMergeError::SectionNotFound(_))
    }
}
