// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Repository settings overrides
//!
//! An organization baseline (`SettingsDefinition`) is adjusted by a list of
//! `OverrideDirective`s, each merged onto one section with the structured
//! merge engine. Two protection fields are guarded after every merge:
//! review counts never go down, and an empty status check list leaves the
//! existing checks in place.

pub mod guards;
pub mod overrides;
pub mod schema;

pub use guards::{preserve_unless_specified, ratchet_review_count};
pub use overrides::{
    apply_overrides, apply_overrides_with_report, OverrideDirective, SkippedOverride,
};
pub use schema::{
    BranchProtectionRule, BypassActor, FeatureSettings, PullRequestParameters, RefNameCondition,
    RepositorySettings, RequiredReviews, RequiredStatusChecks, Ruleset, RulesetConditions,
    RulesetRule, SecuritySettings, SettingsDefinition, StatusCheck, StatusCheckParameters,
};
