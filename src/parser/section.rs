//! The section tree data model.

use crate::query::{self, QueryError, SectionPath};
use serde::Serialize;
use std::fmt;

/// Separator used by [`Section::find`].
pub const DEFAULT_SEPARATOR: &str = ".";

/// One heading-delimited region of a document.
///
/// Sections are built once by [`build_tree`](super::build_tree) and never
/// mutated afterwards. The synthetic root has ordinal 0 and depth 0; real
/// headings are numbered from 1 in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    title: String,
    depth: usize,
    ordinal: usize,
    content: String,
    children: Vec<Section>,
}

impl Section {
    pub(crate) fn new(
        title: String,
        depth: usize,
        ordinal: usize,
        content: String,
        children: Vec<Section>,
    ) -> Self {
        Self {
            title,
            depth,
            ordinal,
            content,
            children,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Position in document order; 0 for the root.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Raw text between this heading and the next heading.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Direct subsections in document order.
    ///
    /// Usually one level deeper than `self`. When the document skips a
    /// heading level (`==A==` followed by `====B====`) the child keeps its own
    /// depth, so it can be two or more levels deeper.
    pub fn children(&self) -> &[Section] {
        &self.children
    }

    /// Number of sections below this one, at any depth.
    pub fn count_children(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.count_children())
            .sum()
    }

    /// Depth-first iterator over this section and every descendant, in
    /// document order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Every section in this subtree whose title equals `title`, ignoring
    /// case. Includes `self` when it matches.
    pub fn find_all(&self, title: &str) -> Vec<&Section> {
        let wanted = title.trim().to_lowercase();
        self.walk()
            .filter(|section| section.title.to_lowercase() == wanted)
            .collect()
    }

    /// Resolve a `.`-separated path against this subtree.
    ///
    /// See [`SectionPath`] for the segment syntax. A path that resolves to
    /// nothing is an empty `Vec`, not an error.
    pub fn find(&self, path: &str) -> Result<Vec<&Section>, QueryError> {
        self.find_with(path, DEFAULT_SEPARATOR)
    }

    /// [`find`](Self::find) with a custom separator.
    pub fn find_with(&self, path: &str, separator: &str) -> Result<Vec<&Section>, QueryError> {
        let path = SectionPath::parse(path, separator)?;
        Ok(query::resolve(self, &path))
    }

    /// Union of several paths, each resolved independently.
    ///
    /// Paths that fail to parse are logged and skipped. Results keep the
    /// order of first appearance and contain each section once.
    pub fn find_paths<S: AsRef<str>>(&self, paths: &[S], separator: &str) -> Vec<&Section> {
        let parsed: Vec<SectionPath> = paths
            .iter()
            .filter_map(|path| match SectionPath::parse(path.as_ref(), separator) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    log::warn!("skipping path {:?}: {}", path.as_ref(), err);
                    None
                }
            })
            .collect();
        query::resolve_all(self, &parsed)
    }

    /// The direct parent of the section with `ordinal`, searched within
    /// this subtree.
    pub fn parent_of(&self, ordinal: usize) -> Option<&Section> {
        self.walk()
            .find(|section| section.children.iter().any(|c| c.ordinal == ordinal))
    }

    /// Titles of this subtree with their depth relative to `self` (which is
    /// at 0).
    pub fn outline(&self) -> Vec<(usize, &str)> {
        let mut entries = Vec::new();
        self.collect_outline(0, &mut entries);
        entries
    }

    fn collect_outline<'s>(&'s self, level: usize, entries: &mut Vec<(usize, &'s str)>) {
        entries.push((level, self.title.as_str()));
        for child in &self.children {
            child.collect_outline(level + 1, entries);
        }
    }
}

impl fmt::Display for Section {
    /// Plain outline of titles, one per line, indented by relative depth.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (level, title)) in self.outline().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}{}", "|   ".repeat(level), title)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`Section::walk`].
#[derive(Debug, Clone)]
pub struct Walk<'s> {
    stack: Vec<&'s Section>,
}

impl<'s> Iterator for Walk<'s> {
    type Item = &'s Section;

    fn next(&mut self) -> Option<Self::Item> {
        let section = self.stack.pop()?;
        self.stack.extend(section.children.iter().rev());
        Some(section)
    }
}
