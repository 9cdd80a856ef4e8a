// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Heading scanner
//!
//! Finds ATX headings (`#` through `######`) line by line, skipping anything
//! inside fenced code blocks. A fence is a line of three or more backticks or
//! tildes, optionally followed by a language tag; each fence line flips the
//! in-code state.

use regex::Regex;

/// A heading and the extent of its section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 through 6
    pub level: u8,
    /// Title with surrounding whitespace and closing `#` run removed
    pub title: String,
    /// Line index of the heading itself
    pub line: usize,
    /// Exclusive end line: the next heading at the same or a shallower
    /// level, or the end of the document
    pub end: usize,
}

impl Heading {
    /// Case-insensitive comparison against a trimmed title reference.
    pub fn matches(&self, reference: &str) -> bool {
        self.title.to_lowercase() == reference.trim().to_lowercase()
    }
}

/// Compiled heading and fence patterns
#[derive(Debug, Clone)]
pub struct HeadingScanner {
    heading: Regex,
    fence: Regex,
}

impl HeadingScanner {
    pub fn new() -> Self {
        Self {
            heading: Regex::new(r"^[ \t]{0,3}(#{1,6})[ \t](.*)$").expect("valid heading pattern"),
            fence: Regex::new(r"^\s*(?:`{3,}|~{3,})\s*[^\s`~]*\s*$").expect("valid fence pattern"),
        }
    }

    /// Scan document text.
    pub fn scan(&self, text: &str) -> Vec<Heading> {
        let lines: Vec<&str> = text.lines().collect();
        self.scan_lines(&lines)
    }

    /// Scan an already split line buffer.
    pub fn scan_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Heading> {
        let mut headings = Vec::new();
        let mut in_fence = false;

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if self.fence.is_match(line) {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            if let Some(caps) = self.heading.captures(line) {
                headings.push(Heading {
                    level: caps[1].len() as u8,
                    title: clean_title(&caps[2]),
                    line: index,
                    end: lines.len(),
                });
            }
        }

        for i in 0..headings.len() {
            let level = headings[i].level;
            if let Some(next) = headings[i + 1..].iter().find(|h| h.level <= level) {
                headings[i].end = next.line;
            }
        }

        headings
    }

    /// Whether a single line is a fence delimiter.
    pub fn is_fence(&self, line: &str) -> bool {
        self.fence.is_match(line)
    }
}

impl Default for HeadingScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip an optional closing sequence (`## Title ##`) and trim.
///
/// The closing run only counts when separated from the text by whitespace,
/// so `## C#` keeps its `#`.
fn clean_title(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_closing = trimmed.trim_end_matches('#');

    if without_closing.is_empty() {
        return String::new();
    }
    if without_closing.len() < trimmed.len() && without_closing.ends_with([' ', '\t']) {
        return without_closing.trim().to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(headings: &[Heading]) -> Vec<(u8, &str)> {
        headings.iter().map(|h| (h.level, h.title.as_str())).collect()
    }

    #[test]
    fn test_fence_aware_scan() {
        let scanner = HeadingScanner::new();
        let headings = scanner.scan("# T\n```\n# fake\n```\n## Real");
        assert_eq!(titles(&headings), vec![(1, "T"), (2, "Real")]);
        assert_eq!(headings[0].line, 0);
        assert_eq!(headings[1].line, 4);
    }

    #[test]
    fn test_tilde_fence_with_language() {
        let scanner = HeadingScanner::new();
        let doc = "# A\n~~~bash\n# comment\n\n## also fake\n~~~\n## B";
        assert_eq!(titles(&scanner.scan(&doc)), vec![(1, "A"), (2, "B")]);
    }

    #[test]
    fn test_indented_fence() {
        let scanner = HeadingScanner::new();
        let doc = "# A\n    ```rust\n# not heading\n    ```\n# B";
        assert_eq!(titles(&scanner.scan(doc)), vec![(1, "A"), (1, "B")]);
    }

    #[test]
    fn test_levels_and_non_headings() {
        let scanner = HeadingScanner::new();
        let doc = [
            "###### Six",
            "####### Seven",
            "#NoSpace",
            "    # Too indented",
            "   # Three spaces",
            "#\ttab",
        ]
        .join("\n");
        assert_eq!(
            titles(&scanner.scan(&doc)),
            vec![(6, "Six"), (1, "Three spaces"), (1, "tab")]
        );
    }

    #[test]
    fn test_closing_hashes_stripped() {
        assert_eq!(clean_title(" Title ## "), "Title");
        assert_eq!(clean_title("C#"), "C#");
        assert_eq!(clean_title("##"), "");
        assert_eq!(clean_title("  Spaced   "), "Spaced");
    }

    #[test]
    fn test_section_ends() {
        let scanner = HeadingScanner::new();
        let doc = "# Top\n## A\ntext\n### A.1\nmore\n## B\n# Next";
        let headings = scanner.scan(doc);
        let ends: Vec<(&str, usize)> = headings.iter().map(|h| (h.title.as_str(), h.end)).collect();
        assert_eq!(
            ends,
            vec![("Top", 6), ("A", 5), ("A.1", 5), ("B", 6), ("Next", 7)]
        );
    }

    #[test]
    fn test_matches_case_insensitive() {
        let scanner = HeadingScanner::new();
        let headings = scanner.scan("## Getting Started");
        assert!(headings[0].matches("  getting STARTED "));
        assert!(!headings[0].matches("getting"));
    }
}
