//! Query evaluator.
//!
//! Resolves parsed paths against a section tree. Each segment maps the
//! current candidate set to the de-duplicated union of its matches; a segment
//! that matches nothing ends the path with an empty result.

use indexmap::IndexMap;

use super::path::{Segment, SectionPath};
use crate::parser::Section;

/// Sections selected by `segment`, starting from `candidate`.
///
/// Title and ordinal segments search the candidate's whole subtree, the
/// candidate included, so a path does not need to spell out intermediate
/// levels such as `Etymology 1`.
fn segment_matches<'s>(candidate: &'s Section, segment: &Segment) -> Vec<&'s Section> {
    match segment {
        Segment::Children => candidate.children().iter().collect(),
        Segment::Descendants => candidate.walk().collect(),
        Segment::Title(_) | Segment::Ordinal { .. } => candidate
            .walk()
            .filter(|section| segment.matches(section))
            .collect(),
    }
}

/// Resolve `path` starting from `root`. Results are in document order.
pub fn resolve<'s>(root: &'s Section, path: &SectionPath) -> Vec<&'s Section> {
    let mut candidates: Vec<&Section> = vec![root];

    for (i, segment) in path.segments.iter().enumerate() {
        let mut next: IndexMap<usize, &Section> = IndexMap::new();
        for candidate in &candidates {
            for section in segment_matches(candidate, segment) {
                next.entry(section.ordinal()).or_insert(section);
            }
        }
        log::debug!("segment {} ({:?}): {} candidates", i, segment, next.len());

        if next.is_empty() {
            return Vec::new();
        }
        next.sort_keys();
        candidates = next.into_values().collect();
    }

    candidates
}

/// Union of several resolved paths, each section once, in order of first
/// appearance.
pub fn resolve_all<'s>(root: &'s Section, paths: &[SectionPath]) -> Vec<&'s Section> {
    let mut union: IndexMap<usize, &Section> = IndexMap::new();
    for path in paths {
        for section in resolve(root, path) {
            union.entry(section.ordinal()).or_insert(section);
        }
    }
    union.into_values().collect()
}
