// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Post-merge guards for protection settings
//!
//! Two fields do not follow plain override semantics:
//! - the required approving review count only ratchets upward
//! - an empty required status check list keeps the existing list
//!
//! Dropping the whole review or status check block does not get around
//! either rule: the block comes back from the existing rule.

use super::schema::{BranchProtectionRule, Ruleset, RulesetRule};

/// Never let a configured review count go down.
///
/// With an existing value the result is the larger of the two; a missing
/// desired value keeps the existing one.
pub fn ratchet_review_count(existing: Option<u32>, desired: Option<u32>) -> Option<u32> {
    match (existing, desired) {
        (Some(existing), Some(desired)) => Some(existing.max(desired)),
        (Some(existing), None) => Some(existing),
        (None, desired) => desired,
    }
}

/// Keep `existing` when `desired` is empty, otherwise take `desired` whole.
pub fn preserve_unless_specified<T: Clone>(existing: &[T], desired: Vec<T>) -> Vec<T> {
    if desired.is_empty() {
        existing.to_vec()
    } else {
        desired
    }
}

/// Apply both guards to a merged branch protection rule.
///
/// A review block or status check block the merge dropped is restored from
/// `existing` when it carried a count or checks.
pub fn guard_branch_rule(existing: &BranchProtectionRule, merged: &mut BranchProtectionRule) {
    if let Some(before) = &existing.required_reviews {
        if let Some(after) = &mut merged.required_reviews {
            let count = ratchet_review_count(
                before.required_approving_review_count,
                after.required_approving_review_count,
            );
            if count != after.required_approving_review_count {
                tracing::debug!(
                    "Keeping review count {:?} for branch rule '{}' (override asked for {:?})",
                    count,
                    merged.pattern,
                    after.required_approving_review_count
                );
            }
            after.required_approving_review_count = count;
        } else if before.required_approving_review_count.is_some() {
            tracing::debug!(
                "Restoring required reviews for branch rule '{}'",
                merged.pattern
            );
            merged.required_reviews = Some(before.clone());
        }
    }

    if let Some(before) = &existing.required_status_checks {
        if let Some(after) = &mut merged.required_status_checks {
            after.contexts =
                preserve_unless_specified(&before.contexts, std::mem::take(&mut after.contexts));
        } else if !before.contexts.is_empty() {
            tracing::debug!(
                "Restoring required status checks for branch rule '{}'",
                merged.pattern
            );
            merged.required_status_checks = Some(before.clone());
        }
    }
}

/// Apply both guards to a merged ruleset.
///
/// A `pull_request` or `required_status_checks` rule the merge dropped is
/// appended back from `existing` when it carried a count or checks.
pub fn guard_ruleset(existing: &Ruleset, merged: &mut Ruleset) {
    let name = merged.name.clone();

    if let Some(before) = existing.pull_request() {
        if let Some(after) = merged.pull_request_mut() {
            let count = ratchet_review_count(
                before.required_approving_review_count,
                after.required_approving_review_count,
            );
            if count != after.required_approving_review_count {
                tracing::debug!(
                    "Keeping review count {:?} for ruleset '{}' (override asked for {:?})",
                    count,
                    name,
                    after.required_approving_review_count
                );
            }
            after.required_approving_review_count = count;
        } else if before.required_approving_review_count.is_some() {
            tracing::debug!("Restoring pull_request rule for ruleset '{}'", name);
            merged.rules.push(RulesetRule::PullRequest(before.clone()));
        }
    }

    if let Some(before) = existing.status_checks() {
        if let Some(after) = merged.status_checks_mut() {
            after.required_status_checks = preserve_unless_specified(
                &before.required_status_checks,
                std::mem::take(&mut after.required_status_checks),
            );
        } else if !before.required_status_checks.is_empty() {
            tracing::debug!(
                "Restoring required_status_checks rule for ruleset '{}'",
                name
            );
            merged
                .rules
                .push(RulesetRule::RequiredStatusChecks(before.clone()));
        }
    }
}
