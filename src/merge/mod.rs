// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Merge engine for structured documents
//!
//! Combines an organization baseline with repository overrides:
//! - `engine`: map merge under `deep`, `shallow` or `overlay`
//! - `arrays`: sequence merge (`append`, `prepend`, `replace`)
//! - `directives`: sequence strategies bound to declared paths

pub mod arrays;
pub mod directives;
pub mod engine;
pub mod strategy;

pub use arrays::{merge_array_values, merge_arrays, ArrayStrategy};
pub use directives::{merge_with_directives, ArrayDefault, ArrayDirective};
pub use engine::{merge, merge_tagged};
pub use strategy::MergeStrategy;
