// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::document::Format;
use crate::error::{OrgMergeError, Result};
use crate::markdown::{self, is_markdown_path};
use crate::merge::MergeStrategy;

use super::{FileRule, SyncConfig};

impl SyncConfig {
    /// Check the whole config up front; the first problem found is returned.
    ///
    /// Settings directives are checked here too, even though applying them
    /// later skips bad ones instead of failing.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.files {
            rule.validate()?;
        }

        for (index, directive) in self.settings.iter().enumerate() {
            if directive.section.trim().is_empty() {
                return Err(OrgMergeError::Config(format!(
                    "settings[{}]: section is empty",
                    index
                )));
            }
            MergeStrategy::from_optional(directive.strategy.as_deref())?;
            if !(directive.values.is_object() || directive.values.is_null()) {
                return Err(OrgMergeError::Config(format!(
                    "settings[{}] ({}): override must be a map",
                    index, directive.section
                )));
            }
        }

        Ok(())
    }
}

impl FileRule {
    /// Check that the rule's edits fit its file type.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(OrgMergeError::Config("file rule with empty path".to_string()));
        }

        if is_markdown_path(&self.path) {
            if self.has_structured_changes() {
                return Err(self.error("Markdown files take section edits, not overrides"));
            }
            return markdown::validate(&self.sections);
        }

        if !self.sections.is_empty() {
            return Err(self.error("section edits need a Markdown file"));
        }
        if self.has_structured_changes() && Format::from_path(&self.path).is_none() {
            return Err(self.error("overrides need a .yml, .yaml or .json file"));
        }
        if let Some(overrides) = &self.overrides {
            if !overrides.is_object() {
                return Err(self.error("overrides must be a map"));
            }
        }

        Ok(())
    }

    fn error(&self, message: &str) -> OrgMergeError {
        OrgMergeError::Config(format!("{}: {}", self.path, message))
    }
}
