// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Section patcher
//!
//! Applies validated edits to a line buffer. Every edit is either a block
//! insertion at a line index or a removal of a line range; the heading table
//! is rebuilt after each one so later edits see earlier results.

use super::ops::{checked, SectionAction, SectionEdit, ValidEdit};
use super::scan::{Heading, HeadingScanner};
use crate::error::{OrgMergeError, Result};

/// Applies heading-addressed edits to Markdown documents
#[derive(Debug, Clone, Default)]
pub struct SectionPatcher {
    scanner: HeadingScanner,
}

impl SectionPatcher {
    pub fn new() -> Self {
        Self::with_scanner(HeadingScanner::new())
    }

    pub fn with_scanner(scanner: HeadingScanner) -> Self {
        Self { scanner }
    }

    pub fn scanner(&self) -> &HeadingScanner {
        &self.scanner
    }

    /// List the sections of a document.
    pub fn sections(&self, document: &str) -> Vec<Heading> {
        self.scanner.scan(document)
    }

    /// Apply `operations` in order and return the new document.
    ///
    /// All operations are validated before any is applied. A heading that
    /// cannot be found aborts the whole patch.
    pub fn patch(&self, document: &str, operations: &[SectionEdit]) -> Result<String> {
        let edits = checked(operations)?;
        if edits.is_empty() {
            return Ok(document.to_string());
        }

        let mut lines: Vec<String> = document.lines().map(str::to_string).collect();
        for edit in &edits {
            self.apply(&mut lines, edit)?;
        }

        Ok(join_lines(lines, document.ends_with('\n')))
    }

    /// Byte-oriented entry point; the document must be UTF-8.
    pub fn patch_bytes(&self, document: &[u8], operations: &[SectionEdit]) -> Result<Vec<u8>> {
        let text =
            std::str::from_utf8(document).map_err(|e| OrgMergeError::Encoding(e.to_string()))?;
        self.patch(text, operations).map(String::into_bytes)
    }

    fn apply(&self, lines: &mut Vec<String>, edit: &ValidEdit) -> Result<()> {
        match edit.action {
            SectionAction::Append => {
                let at = lines.len();
                insert_block(lines, at, &edit.content);
            }
            SectionAction::Prepend => insert_block(lines, 0, &edit.content),
            SectionAction::After => {
                let section = self.find(lines, &edit.heading)?;
                insert_block(lines, section.end, &edit.content);
            }
            SectionAction::Before => {
                let section = self.find(lines, &edit.heading)?;
                insert_block(lines, section.line, &edit.content);
            }
            SectionAction::Replace => {
                let section = self.find(lines, &edit.heading)?;
                lines.drain(section.line..section.end);
                insert_block(lines, section.line, &edit.content);
            }
            SectionAction::Delete => {
                let section = self.find(lines, &edit.heading)?;
                lines.drain(section.line..section.end);
            }
        }
        Ok(())
    }

    /// First heading in document order whose title matches.
    fn find(&self, lines: &[String], reference: &str) -> Result<Heading> {
        self.scanner
            .scan_lines(lines)
            .into_iter()
            .find(|h| h.matches(reference))
            .ok_or_else(|| OrgMergeError::SectionNotFound(reference.to_string()))
    }
}

/// Patch with a freshly built patcher.
pub fn patch(document: &str, operations: &[SectionEdit]) -> Result<String> {
    SectionPatcher::new().patch(document, operations)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Insert `content` at line `at`, separated from its neighbours by exactly
/// one blank line on each side that has text. Blank lines already around
/// `at` are folded into that separator.
fn insert_block(lines: &mut Vec<String>, at: usize, content: &str) {
    let block: Vec<&str> = content.lines().collect();
    let Some(first) = block.iter().position(|l| !is_blank(l)) else {
        return;
    };
    let last = block.iter().rposition(|l| !is_blank(l)).unwrap_or(first);

    let mut start = at;
    while start > 0 && is_blank(&lines[start - 1]) {
        start -= 1;
    }
    let mut end = at;
    while end < lines.len() && is_blank(&lines[end]) {
        end += 1;
    }

    let mut insert: Vec<String> = Vec::with_capacity(last - first + 3);
    if start > 0 {
        insert.push(String::new());
    }
    insert.extend(block[first..=last].iter().map(|l| l.to_string()));
    if end < lines.len() {
        insert.push(String::new());
    }

    lines.splice(start..end, insert);
}

fn trim_trailing_blanks(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|l| is_blank(l)) {
        lines.pop();
    }
}

fn join_lines(mut lines: Vec<String>, trailing_newline: bool) -> String {
    trim_trailing_blanks(&mut lines);
    let mut out = lines.join("\n");
    if trailing_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}
