// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Rendering synced files
//!
//! Turns the organization's copy of a file into the repository's copy by
//! applying that file's `FileRule`. Text in, text out: fetching and
//! committing files is left to the caller.

use crate::config::FileRule;
use crate::document::{parse_document, serialize_document, Format};
use crate::error::Result;
use crate::markdown::{is_markdown_path, SectionPatcher};
use crate::merge::merge_with_directives;

impl FileRule {
    /// Produce the repository copy of `baseline` under this rule.
    ///
    /// - Markdown with section edits: patched by `patcher`
    /// - YAML/JSON with overrides or array rules: merged and re-serialized
    /// - anything else: returned unchanged
    pub fn render(&self, baseline: &str, patcher: &SectionPatcher) -> Result<String> {
        if is_markdown_path(&self.path) {
            if self.sections.is_empty() {
                return Ok(baseline.to_string());
            }
            return patcher.patch(baseline, &self.sections);
        }

        let Some(format) = Format::from_path(&self.path) else {
            return Ok(baseline.to_string());
        };
        if !self.has_structured_changes() {
            return Ok(baseline.to_string());
        }

        let base = parse_document(baseline, format)?;
        let overlay = self.overrides.clone().unwrap_or_default();
        let merged = merge_with_directives(
            &base,
            &overlay,
            self.merge_strategy(),
            &self.arrays,
            self.array_default,
        )?;

        tracing::debug!(
            "Rendered {} with {} strategy and {} array directive(s)",
            self.path,
            self.merge_strategy(),
            self.arrays.len()
        );
        serialize_document(&merged, format)
    }
}
