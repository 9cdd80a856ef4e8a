// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Markdown section patching
//!
//! Documents are addressed by heading title. A section runs from its heading
//! to the next heading at the same or a shallower level, so it includes its
//! subsections. Headings inside fenced code blocks are ignored.
//!
//! ## Example
//!
//! ```
//! use orgmerge::markdown::{SectionEdit, SectionPatcher};
//!
//! let patcher = SectionPatcher::new();
//! let doc = "# Project\n\n## Support\n\nAsk in chat.";
//! let out = patcher
//!     .patch(doc, &[SectionEdit::replace("support", "## Support\n\nOpen an issue.")])
//!     .unwrap();
//! assert_eq!(out, "# Project\n\n## Support\n\nOpen an issue.");
//! ```

pub mod ops;
pub mod patch;
pub mod scan;

pub use ops::{validate, SectionAction, SectionEdit};
pub use patch::{patch, SectionPatcher};
pub use scan::{Heading, HeadingScanner};

use std::path::Path;

/// Whether a file path names a Markdown document.
pub fn is_markdown_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown"))
}
