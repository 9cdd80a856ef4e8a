// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! orgmerge - merge and patch engine for organization-wide repository sync.
//!
//! Combines an organization baseline with repository overrides:
//! - `document`: YAML/JSON document trees, structural equality, `$.a.b` paths
//! - `merge`: `deep` / `shallow` / `overlay` map merge and array strategies
//! - `markdown`: heading-addressed section edits that skip fenced code
//! - `settings`: section overrides for repository settings, with the review
//!   count ratchet and status check preservation
//! - `config`, `files`: declarative per-repository rules and file rendering
//!
//! Everything here is synchronous and free of I/O apart from loading a
//! config file; there is no shared state, so calls can run concurrently.
//!
//! ## Example
//!
//! ```
//! use orgmerge::merge::{merge, MergeStrategy};
//! use serde_json::json;
//!
//! let base = json!({"labels": {"bug": "red", "wontfix": "white"}});
//! let overlay = json!({"labels": {"wontfix": null, "docs": "blue"}});
//!
//! let merged = merge(&base, &overlay, MergeStrategy::Deep);
//! assert_eq!(merged, json!({"labels": {"bug": "red", "docs": "blue"}}));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod files;
pub mod markdown;
pub mod merge;
pub mod settings;

pub use error::{OrgMergeError, Result};
