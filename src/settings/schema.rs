// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Typed repository settings
//!
//! Every field is optional so a partial definition can be written by hand
//! and unset fields stay out of the serialized form.

use serde::{Deserialize, Serialize};

/// Full settings definition for a repository
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsDefinition {
    #[serde(default)]
    pub repository: RepositorySettings,

    #[serde(default)]
    pub features: FeatureSettings,

    #[serde(default)]
    pub security: SecuritySettings,

    /// Branch protection rules, addressed by their pattern
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch_protection: Vec<BranchProtectionRule>,

    /// Rulesets, addressed by their name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rulesets: Vec<Ruleset>,
}

impl SettingsDefinition {
    pub fn branch_rule(&self, pattern: &str) -> Option<&BranchProtectionRule> {
        self.branch_protection.iter().find(|r| r.pattern == pattern)
    }

    pub fn ruleset(&self, name: &str) -> Option<&Ruleset> {
        self.rulesets.iter().find(|r| r.name == name)
    }
}

/// General repository options
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_auto_merge: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,
}

/// Optional repository features
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_discussions: Option<bool>,
}

/// Security and analysis toggles
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SecuritySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability_alerts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated_security_fixes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_scanning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_scanning_push_protection: Option<bool>,
}

/// Classic branch protection for one branch pattern
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BranchProtectionRule {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_reviews: Option<RequiredReviews>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_status_checks: Option<RequiredStatusChecks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_admins: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_linear_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_conversation_resolution: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_force_pushes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_deletions: Option<bool>,
}

/// Pull request review requirements
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequiredReviews {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_code_owner_reviews: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_last_push_approval: Option<bool>,
}

/// Status checks that must pass before merging
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequiredStatusChecks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(default)]
    pub contexts: Vec<String>,
}

/// A named ruleset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ruleset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<RulesetConditions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bypass_actors: Vec<BypassActor>,
    #[serde(default)]
    pub rules: Vec<RulesetRule>,
}

impl Ruleset {
    pub fn pull_request(&self) -> Option<&PullRequestParameters> {
        self.rules.iter().find_map(|rule| match rule {
            RulesetRule::PullRequest(params) => Some(params),
            _ => None,
        })
    }

    pub fn pull_request_mut(&mut self) -> Option<&mut PullRequestParameters> {
        self.rules.iter_mut().find_map(|rule| match rule {
            RulesetRule::PullRequest(params) => Some(params),
            _ => None,
        })
    }

    pub fn status_checks(&self) -> Option<&StatusCheckParameters> {
        self.rules.iter().find_map(|rule| match rule {
            RulesetRule::RequiredStatusChecks(params) => Some(params),
            _ => None,
        })
    }

    pub fn status_checks_mut(&mut self) -> Option<&mut StatusCheckParameters> {
        self.rules.iter_mut().find_map(|rule| match rule {
            RulesetRule::RequiredStatusChecks(params) => Some(params),
            _ => None,
        })
    }
}

/// Ref name include/exclude patterns a ruleset applies to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulesetConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<RefNameCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefNameCondition {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Actor allowed to bypass a ruleset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BypassActor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<u64>,
    pub actor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_mode: Option<String>,
}

/// One rule inside a ruleset, tagged by `type` with its `parameters`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters", rename_all = "snake_case")]
pub enum RulesetRule {
    PullRequest(PullRequestParameters),
    RequiredStatusChecks(StatusCheckParameters),
    Creation,
    Update,
    Deletion,
    NonFastForward,
    RequiredLinearHistory,
    RequiredSignatures,
}

/// Parameters of a `pull_request` rule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PullRequestParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews_on_push: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_code_owner_review: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_last_push_approval: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_review_thread_resolution: Option<bool>,
}

/// Parameters of a `required_status_checks` rule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCheckParameters {
    #[serde(default)]
    pub required_status_checks: Vec<StatusCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_required_status_checks_policy: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<u64>,
}

impl StatusCheck {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            integration_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_definition_deserializes() {
        let settings: SettingsDefinition = serde_json::from_value(json!({})).unwrap();
        assert_eq!(settings, SettingsDefinition::default());
    }

    #[test]
    fn test_unset_fields_not_serialized() {
        let value = serde_json::to_value(SettingsDefinition::default()).unwrap();
        assert_eq!(value, json!({"repository": {}, "features": {}, "security": {}}));
    }

    #[test]
    fn test_ruleset_rules_roundtrip() {
        let value = json!({
            "name": "main",
            "enforcement": "active",
            "rules": [
                {"type": "deletion"},
                {"type": "pull_request", "parameters": {"required_approving_review_count": 2}},
                {"type": "required_status_checks", "parameters": {
                    "required_status_checks": [{"context": "ci"}]
                }}
            ]
        });
        let ruleset: Ruleset = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(ruleset.rules[0], RulesetRule::Deletion);
        assert_eq!(
            ruleset.pull_request().unwrap().required_approving_review_count,
            Some(2)
        );
        assert_eq!(
            ruleset.status_checks().unwrap().required_status_checks,
            vec![StatusCheck::new("ci")]
        );
        assert_eq!(serde_json::to_value(&ruleset).unwrap(), value);
    }

    #[test]
    fn test_lookup_by_pattern_and_name() {
        let settings = SettingsDefinition {
            branch_protection: vec![BranchProtectionRule {
                pattern: "main".to_string(),
                ..Default::default()
            }],
            rulesets: vec![Ruleset {
                name: "release".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(settings.branch_rule("main").is_some());
        assert!(settings.branch_rule("release").is_none());
        assert!(settings.ruleset("release").is_some());
    }
}
