// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OrgMergeError, Result};

/// How two document trees are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MergeStrategy {
    /// Recursive merge: nested maps merge, everything else is replaced,
    /// explicit null deletes.
    #[default]
    Deep,
    /// Only top-level keys merge; nested maps are replaced wholesale.
    Shallow,
    /// Alias of `Deep`, kept distinct so it serializes back as written.
    Overlay,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Deep => "deep",
            MergeStrategy::Shallow => "shallow",
            MergeStrategy::Overlay => "overlay",
        }
    }

    /// Whether nested maps are merged recursively.
    pub fn is_recursive(&self) -> bool {
        matches!(self, MergeStrategy::Deep | MergeStrategy::Overlay)
    }

    /// Parse an optional tag, defaulting to `deep` when absent.
    pub fn from_optional(tag: Option<&str>) -> Result<Self> {
        match tag {
            Some(tag) => tag.parse(),
            None => Ok(MergeStrategy::Deep),
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = OrgMergeError;

    /// Unrecognized tags are always an error; there is no fallback.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deep" => Ok(MergeStrategy::Deep),
            "shallow" => Ok(MergeStrategy::Shallow),
            "overlay" => Ok(MergeStrategy::Overlay),
            other => Err(OrgMergeError::UnknownStrategy(other.to_string())),
        }
    }
}

impl TryFrom<String> for MergeStrategy {
    type Error = OrgMergeError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MergeStrategy> for String {
    fn from(strategy: MergeStrategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
