// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Section edit operations
//!
//! | action    | heading  | content  |
//! |-----------|----------|----------|
//! | `after`   | required | optional |
//! | `before`  | required | optional |
//! | `replace` | required | required |
//! | `delete`  | required | ignored  |
//! | `append`  | ignored  | required |
//! | `prepend` | ignored  | required |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OrgMergeError, Result};

/// One requested edit, as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEdit {
    pub action: String,
    /// Title of the heading the edit is anchored to
    #[serde(default, alias = "section", skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SectionEdit {
    pub fn new(
        action: impl Into<String>,
        heading: Option<&str>,
        content: Option<&str>,
    ) -> Self {
        Self {
            action: action.into(),
            heading: heading.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    pub fn after(heading: &str, content: &str) -> Self {
        Self::new("after", Some(heading), Some(content))
    }

    pub fn before(heading: &str, content: &str) -> Self {
        Self::new("before", Some(heading), Some(content))
    }

    pub fn replace(heading: &str, content: &str) -> Self {
        Self::new("replace", Some(heading), Some(content))
    }

    pub fn delete(heading: &str) -> Self {
        Self::new("delete", Some(heading), None)
    }

    pub fn append(content: &str) -> Self {
        Self::new("append", None, Some(content))
    }

    pub fn prepend(content: &str) -> Self {
        Self::new("prepend", None, Some(content))
    }
}

/// Recognized edit actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAction {
    After,
    Before,
    Replace,
    Delete,
    Append,
    Prepend,
}

impl SectionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionAction::After => "after",
            SectionAction::Before => "before",
            SectionAction::Replace => "replace",
            SectionAction::Delete => "delete",
            SectionAction::Append => "append",
            SectionAction::Prepend => "prepend",
        }
    }

    fn needs_heading(&self) -> bool {
        !matches!(self, SectionAction::Append | SectionAction::Prepend)
    }

    fn needs_content(&self) -> bool {
        matches!(
            self,
            SectionAction::Replace | SectionAction::Append | SectionAction::Prepend
        )
    }
}

impl FromStr for SectionAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "after" => Ok(SectionAction::After),
            "before" => Ok(SectionAction::Before),
            "replace" => Ok(SectionAction::Replace),
            "delete" => Ok(SectionAction::Delete),
            "append" => Ok(SectionAction::Append),
            "prepend" => Ok(SectionAction::Prepend),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

impl fmt::Display for SectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checked edit, ready to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidEdit {
    pub action: SectionAction,
    /// Present for every heading-anchored action
    pub heading: String,
    pub content: String,
}

/// Check every edit without touching any document.
pub fn validate(operations: &[SectionEdit]) -> Result<()> {
    checked(operations).map(|_| ())
}

/// Validate all edits up front; one bad edit rejects the whole list.
pub(crate) fn checked(operations: &[SectionEdit]) -> Result<Vec<ValidEdit>> {
    operations
        .iter()
        .enumerate()
        .map(|(index, op)| check_one(index, op))
        .collect()
}

fn check_one(index: usize, op: &SectionEdit) -> Result<ValidEdit> {
    let invalid = |reason: String| OrgMergeError::InvalidOperation { index, reason };

    let action: SectionAction = op.action.trim().parse().map_err(invalid)?;

    let heading = op
        .heading
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty());
    let content = op.content.as_deref().filter(|c| !c.trim().is_empty());

    if action.needs_heading() && heading.is_none() {
        return Err(invalid(format!("'{}' requires a heading", action)));
    }
    if action.needs_content() && content.is_none() {
        return Err(invalid(format!("'{}' requires content", action)));
    }

    Ok(ValidEdit {
        action,
        heading: heading.unwrap_or_default().to_string(),
        content: content.unwrap_or_default().to_string(),
    })
}
