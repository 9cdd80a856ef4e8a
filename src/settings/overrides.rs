// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Section-scoped overrides on top of a settings baseline
//!
//! Each directive names one section:
//! 1. a fixed section (`repository`, `features`, `security`)
//! 2. a branch protection rule, by pattern
//! 3. a ruleset, by name
//!
//! The section is converted to a document tree, merged with the directive's
//! override map, and converted back. Directives are independent: one that
//! fails is logged and skipped, and the rest still apply.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::guards::{guard_branch_rule, guard_ruleset};
use super::schema::SettingsDefinition;
use crate::error::{OrgMergeError, Result};
use crate::merge::{merge, MergeStrategy};

/// One override for one settings section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideDirective {
    /// Fixed section name, branch protection pattern, or ruleset name
    pub section: String,
    /// Merge strategy tag; `deep` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Override map merged onto the section
    #[serde(default, rename = "override", alias = "overrides")]
    pub values: Value,
}

impl OverrideDirective {
    pub fn new(section: impl Into<String>, values: Value) -> Self {
        Self {
            section: section.into(),
            strategy: None,
            values,
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }
}

/// A directive that could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOverride {
    pub section: String,
    pub reason: String,
}

/// Where a directive's section lives in the definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionTarget {
    Repository,
    Features,
    Security,
    BranchRule(usize),
    Ruleset(usize),
}

fn resolve(settings: &SettingsDefinition, section: &str) -> Option<SectionTarget> {
    match section {
        "repository" => return Some(SectionTarget::Repository),
        "features" => return Some(SectionTarget::Features),
        "security" => return Some(SectionTarget::Security),
        _ => {}
    }

    if let Some(index) = settings
        .branch_protection
        .iter()
        .position(|rule| rule.pattern == section)
    {
        return Some(SectionTarget::BranchRule(index));
    }

    settings
        .rulesets
        .iter()
        .position(|ruleset| ruleset.name == section)
        .map(SectionTarget::Ruleset)
}

/// Apply overrides and return a new definition. Never fails; skipped
/// directives are reported through `tracing`.
pub fn apply_overrides(
    baseline: &SettingsDefinition,
    directives: &[OverrideDirective],
) -> SettingsDefinition {
    apply_overrides_with_report(baseline, directives).0
}

/// Like [`apply_overrides`], also returning the directives that were skipped.
pub fn apply_overrides_with_report(
    baseline: &SettingsDefinition,
    directives: &[OverrideDirective],
) -> (SettingsDefinition, Vec<SkippedOverride>) {
    let mut working = baseline.clone();
    let mut skipped = Vec::new();

    for directive in directives {
        match apply_one(&mut working, directive) {
            Ok(()) => {
                tracing::debug!("Applied settings override for '{}'", directive.section);
            }
            Err(e) => {
                tracing::warn!(
                    "Skipping settings override for '{}': {}",
                    directive.section,
                    e
                );
                skipped.push(SkippedOverride {
                    section: directive.section.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (working, skipped)
}

fn apply_one(working: &mut SettingsDefinition, directive: &OverrideDirective) -> Result<()> {
    let strategy = MergeStrategy::from_optional(directive.strategy.as_deref())?;
    let target = resolve(working, &directive.section)
        .ok_or_else(|| OrgMergeError::UnresolvableSection(directive.section.clone()))?;
    let overlay = &directive.values;

    match target {
        SectionTarget::Repository => {
            working.repository = merge_typed(&working.repository, overlay, strategy)?;
        }
        SectionTarget::Features => {
            working.features = merge_typed(&working.features, overlay, strategy)?;
        }
        SectionTarget::Security => {
            working.security = merge_typed(&working.security, overlay, strategy)?;
        }
        SectionTarget::BranchRule(index) => {
            let existing = &working.branch_protection[index];
            let mut merged = merge_typed(existing, overlay, strategy)?;
            guard_branch_rule(existing, &mut merged);
            working.branch_protection[index] = merged;
        }
        SectionTarget::Ruleset(index) => {
            let existing = &working.rulesets[index];
            let mut merged = merge_typed(existing, overlay, strategy)?;
            guard_ruleset(existing, &mut merged);
            working.rulesets[index] = merged;
        }
    }

    Ok(())
}

/// Round-trip a typed section through the document tree merge.
fn merge_typed<T>(current: &T, overlay: &Value, strategy: MergeStrategy) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let base = serde_json::to_value(current)?;
    let merged = merge(&base, overlay, strategy);
    serde_json::from_value(merged).map_err(|e| OrgMergeError::Conversion(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::schema::{BranchProtectionRule, RepositorySettings, Ruleset};
    use serde_json::json;

    fn baseline() -> SettingsDefinition {
        SettingsDefinition {
            repository: RepositorySettings {
                description: Some("org default".to_string()),
                allow_squash_merge: Some(true),
                ..Default::default()
            },
            branch_protection: vec![BranchProtectionRule {
                pattern: "main".to_string(),
                enforce_admins: Some(true),
                ..Default::default()
            }],
            rulesets: vec![Ruleset {
                name: "main".to_string(),
                enforcement: Some("active".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_no_directives_is_identity() {
        let base = baseline();
        assert_eq!(apply_overrides(&base, &[]), base);
    }

    #[test]
    fn test_fixed_section_merge() {
        let base = baseline();
        let result = apply_overrides(
            &base,
            &[OverrideDirective::new("repository", json!({"description": "mine"}))],
        );
        assert_eq!(result.repository.description.as_deref(), Some("mine"));
        assert_eq!(result.repository.allow_squash_merge, Some(true));
        assert_eq!(base.repository.description.as_deref(), Some("org default"));
    }

    #[test]
    fn test_null_deletes_field() {
        let result = apply_overrides(
            &baseline(),
            &[OverrideDirective::new("repository", json!({"allow_squash_merge": null}))],
        );
        assert_eq!(result.repository.allow_squash_merge, None);
    }

    #[test]
    fn test_branch_pattern_resolves_before_ruleset_name() {
        let result = apply_overrides(
            &baseline(),
            &[OverrideDirective::new(
                "main",
                json!({"enforcement": "disabled", "enforce_admins": false}),
            )],
        );
        assert_eq!(result.branch_protection[0].enforce_admins, Some(false));
        assert_eq!(result.rulesets[0].enforcement.as_deref(), Some("active"));
    }

    #[test]
    fn test_unresolvable_section_skipped() {
        let (result, skipped) = apply_overrides_with_report(
            &baseline(),
            &[
                OverrideDirective::new("does-not-exist", json!({"x": 1})),
                OverrideDirective::new("features", json!({"has_wiki": false})),
            ],
        );
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].section, "does-not-exist");
        assert!(skipped[0].reason.contains("Unresolvable"));
        assert_eq!(result.features.has_wiki, Some(false));
    }

    #[test]
    fn test_unknown_strategy_skipped() {
        let (result, skipped) = apply_overrides_with_report(
            &baseline(),
            &[OverrideDirective::new("features", json!({"has_wiki": true}))
                .with_strategy("sideways")],
        );
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].reason.contains("Unknown merge strategy"));
        assert_eq!(result.features.has_wiki, None);
    }

    #[test]
    fn test_type_mismatch_skipped() {
        let base = baseline();
        let (result, skipped) = apply_overrides_with_report(
            &base,
            &[OverrideDirective::new("security", json!({"secret_scanning": "yes please"}))],
        );
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].reason.starts_with("Conversion error"));
        assert_eq!(result, base);
    }

    #[test]
    fn test_directive_serde() {
        let directive: OverrideDirective = serde_yaml::from_str(
            "section: main\nstrategy: shallow\noverride:\n  enforce_admins: false\n",
        )
        .unwrap();
        assert_eq!(directive.section, "main");
        assert_eq!(directive.strategy.as_deref(), Some("shallow"));
        assert_eq!(directive.values, json!({"enforce_admins": false}));
    }
}
