//! Heading-line scanning helpers.
//!
//! A heading line is a run of `=`, some non-`=` text, and a closing run of
//! `=`, spanning the whole line. Trailing whitespace after the closing run is
//! tolerated because wiki editors often leave it behind.

use regex::Regex;
use std::sync::OnceLock;

/// Character used for heading markers.
pub const HEADING_MARKER: char = '=';

/// A heading line found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine {
    /// Byte offset of the first marker.
    pub start: usize,
    /// Byte offset where the section's content begins (after the line break).
    pub content_start: usize,
    pub depth: usize,
    pub title: String,
}

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^(=+)([^=\n]+)(=+)[ \t\r]*$").unwrap())
}

/// Nesting depth encoded by a heading line: the marker count halved.
///
/// # Examples
///
/// ```
/// # use wikterm::parser::utils::heading_depth;
/// assert_eq!(heading_depth("==English=="), 2);
/// assert_eq!(heading_depth("====Synonyms===="), 4);
/// assert_eq!(heading_depth("=Lopsided=="), 1);
/// ```
pub fn heading_depth(line: &str) -> usize {
    line.chars().filter(|c| *c == HEADING_MARKER).count() / 2
}

/// Strip heading markers and brace artifacts from a title.
///
/// # Examples
///
/// ```
/// # use wikterm::parser::utils::normalize_title;
/// assert_eq!(normalize_title("=== Noun ==="), "Noun");
/// assert_eq!(normalize_title("==={{ety}}==="), "ety");
/// ```
pub fn normalize_title(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '=' | '{' | '}'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Find every heading line in `text`, in document order.
///
/// Lines whose title is empty after normalisation (for example `=={{}}==`)
/// are not headings; they stay part of the surrounding content.
pub fn scan_headings(text: &str) -> Vec<HeadingLine> {
    heading_pattern()
        .find_iter(text)
        .filter_map(|m| {
            let title = normalize_title(m.as_str());
            if title.is_empty() {
                return None;
            }
            let content_start = match text[m.end()..].chars().next() {
                Some('\n') => m.end() + 1,
                _ => m.end(),
            };
            Some(HeadingLine {
                start: m.start(),
                content_start,
                depth: heading_depth(m.as_str()),
                title,
            })
        })
        .collect()
}
