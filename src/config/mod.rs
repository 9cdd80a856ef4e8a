// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Sync configuration
//!
//! Declares how organization files and settings are adapted for one
//! repository. Written as YAML or JSON, e.g.:
//!
//! ```yaml
//! files:
//!   - path: .github/renovate.json
//!     strategy: deep
//!     overrides:
//!       labels: ["deps"]
//!     arrays:
//!       - path: $.labels
//!         strategy: append
//!         dedupe: true
//!   - path: CONTRIBUTING.md
//!     sections:
//!       - action: replace
//!         heading: Support
//!         content: "## Support\n\nAsk in #help."
//! settings:
//!   - section: main
//!     override:
//!       required_reviews:
//!         required_approving_review_count: 2
//! ```

mod io;
mod validation;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::markdown::SectionEdit;
use crate::merge::{ArrayDefault, ArrayDirective, MergeStrategy};
use crate::settings::OverrideDirective;

/// Per-repository sync configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Rules for individual synced files
    #[serde(default)]
    pub files: Vec<FileRule>,

    /// Overrides applied to the organization settings baseline
    #[serde(default)]
    pub settings: Vec<OverrideDirective>,
}

impl SyncConfig {
    /// Rule for a given file path, if one is declared.
    pub fn file_rule(&self, path: &str) -> Option<&FileRule> {
        self.files.iter().find(|rule| rule.path == path)
    }
}

/// How one synced file is adapted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRule {
    /// Repository-relative path; its extension selects the document format
    pub path: String,

    /// Map merge strategy for structured files (`deep` when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<MergeStrategy>,

    /// Override document merged onto the organization file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Value>,

    /// Sequence strategies at declared paths
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arrays: Vec<ArrayDirective>,

    /// Sequence strategy for override sequences without a directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_default: Option<ArrayDefault>,

    /// Section edits for Markdown files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionEdit>,
}

impl FileRule {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn merge_strategy(&self) -> MergeStrategy {
        self.strategy.unwrap_or_default()
    }

    /// Whether the rule changes structured content at all.
    pub fn has_structured_changes(&self) -> bool {
        self.overrides.is_some() || !self.arrays.is_empty() || self.array_default.is_some()
    }
}
