// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::Path;

use crate::document::Format;
use crate::error::{OrgMergeError, Result};

use super::SyncConfig;

impl SyncConfig {
    /// Load a config file. A missing file yields the empty config.
    ///
    /// The format follows the extension; anything other than `.json` is
    /// read as YAML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No sync config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let format = Format::from_path(path).unwrap_or(Format::Yaml);
        Self::parse(&content, format)
            .map_err(|e| OrgMergeError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse config text in the given format.
    pub fn parse(content: &str, format: Format) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = match format {
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Serialize the config, e.g. to write back a normalized copy.
    pub fn to_text(&self, format: Format) -> Result<String> {
        match format {
            Format::Yaml => Ok(serde_yaml::to_string(self)?),
            Format::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
