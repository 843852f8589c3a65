//! Path queries over section trees.
//!
//! Paths select sections by title, ordinal, or wildcard; see
//! [`SectionPath`] for the syntax. Keyword segments such as `definitions`
//! are expanded against a [`Language`] table before resolution.
//!
//! ## Example
//!
//! ```
//! use wikterm::parser::build_tree;
//! use wikterm::query;
//!
//! let root = build_tree("==English==\n===Noun===\n# A feline.\n", "cat");
//! let result = query::execute(&root, "English.Noun", ".", None)?;
//! assert_eq!(result.matches.len(), 1);
//! assert_eq!(result.matches[0].title, "Noun");
//! # Ok::<(), wikterm::query::QueryError>(())
//! ```

mod error;
pub mod eval;
pub mod keywords;
pub mod path;

pub use error::QueryError;
pub use eval::{resolve, resolve_all};
pub use path::{Segment, SectionPath};

use std::collections::HashMap;

use crate::lang::Language;
use crate::parser::Section;

/// A matched section with the title it should be displayed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch<'s> {
    pub section: &'s Section,
    pub title: String,
}

/// Outcome of [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<'s> {
    pub matches: Vec<SectionMatch<'s>>,
    /// The path ended with a separator: show structure, not content.
    pub structure_only: bool,
}

impl QueryResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Give matches that share a title a distinguishing display title:
/// `Noun` under `Etymology 2` becomes `Noun (Etymology 2)`.
pub fn annotate<'s>(root: &'s Section, matches: &[&'s Section]) -> Vec<SectionMatch<'s>> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for section in matches {
        *counts.entry(section.title().to_lowercase()).or_default() += 1;
    }

    matches
        .iter()
        .map(|section| {
            let shared = counts
                .get(&section.title().to_lowercase())
                .is_some_and(|count| *count > 1);
            let title = match root.parent_of(section.ordinal()) {
                Some(parent) if shared => format!("{} ({})", section.title(), parent.title()),
                _ => section.title().to_string(),
            };
            SectionMatch { section, title }
        })
        .collect()
}

/// Expand, parse and resolve `path` against `root`.
///
/// With a `language`, keyword segments expand into one path per title. An
/// expanded path that fails to parse is logged and skipped; the query only
/// fails when no path parses at all.
///
/// # Errors
///
/// Returns the first [`QueryError`] when every expanded path is invalid.
pub fn execute<'s>(
    root: &'s Section,
    path: &str,
    separator: &str,
    language: Option<&Language>,
) -> Result<QueryResult<'s>, QueryError> {
    let expanded = match language {
        Some(language) => keywords::expand(path, separator, language),
        None => vec![path.to_string()],
    };

    let mut parsed = Vec::with_capacity(expanded.len());
    let mut first_error = None;
    for candidate in &expanded {
        match SectionPath::parse(candidate, separator) {
            Ok(section_path) => parsed.push(section_path),
            Err(err) => {
                log::warn!("skipping path {:?}: {}", candidate, err);
                first_error.get_or_insert(err);
            }
        }
    }

    if parsed.is_empty() {
        if let Some(err) = first_error {
            return Err(err);
        }
    }

    let structure_only = parsed.iter().any(|p| p.structure_only);
    let sections = resolve_all(root, &parsed);
    log::debug!("query {:?} matched {} sections", path, sections.len());

    Ok(QueryResult {
        matches: annotate(root, &sections),
        structure_only,
    })
}
