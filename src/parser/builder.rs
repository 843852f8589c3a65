//! Section Tree Builder.
//!
//! The document is first carved into a flat list of `(heading, content)`
//! items, then grouped by depth with a recursive descent over a cursor. Each
//! call builds one node and returns the index of the first item it did not
//! consume, so no list is ever mutated while it is being walked.

use super::section::Section;
use super::utils::{normalize_title, scan_headings};

/// Depth of the synthetic root. Every heading is at least depth 1.
pub const ROOT_DEPTH: usize = 0;

#[derive(Debug)]
struct FlatSection<'t> {
    title: String,
    depth: usize,
    content: &'t str,
}

/// Split `text` into a tree of sections under a root titled `title`.
///
/// Text before the first heading becomes the root's content. A document
/// without headings is a single leaf root holding the whole text.
pub fn build_tree(text: &str, title: &str) -> Section {
    let headings = scan_headings(text);

    let root_end = headings.first().map_or(text.len(), |h| h.start);
    let mut items = Vec::with_capacity(headings.len() + 1);
    items.push(FlatSection {
        title: normalize_title(title),
        depth: ROOT_DEPTH,
        content: &text[..root_end],
    });

    for (i, heading) in headings.iter().enumerate() {
        let end = headings.get(i + 1).map_or(text.len(), |next| next.start);
        items.push(FlatSection {
            title: heading.title.clone(),
            depth: heading.depth,
            content: &text[heading.content_start.min(end)..end],
        });
    }

    let (root, consumed) = build_node(&items, 0);
    debug_assert_eq!(consumed, items.len());
    log::debug!(
        "built section tree for {:?}: {} sections",
        root.title(),
        root.count_children()
    );
    root
}

/// Build the node at `cursor` and everything strictly deeper that follows
/// it. Returns the node and the next unconsumed index.
fn build_node(items: &[FlatSection<'_>], cursor: usize) -> (Section, usize) {
    let item = &items[cursor];
    let mut children = Vec::new();
    let mut next = cursor + 1;

    while next < items.len() && items[next].depth > item.depth {
        let (child, after) = build_node(items, next);
        children.push(child);
        next = after;
    }

    let section = Section::new(
        item.title.clone(),
        item.depth,
        cursor,
        item.content.to_string(),
        children,
    );
    (section, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_headings_gives_leaf_root() {
        let root = build_tree("just some text\nand more", "page");
        assert_eq!(root.title(), "page");
        assert_eq!(root.depth(), ROOT_DEPTH);
        assert!(root.children().is_empty());
        assert_eq!(root.content(), "just some text\nand more");
    }

    #[test]
    fn test_empty_document() {
        let root = build_tree("", "empty");
        assert_eq!(root.content(), "");
        assert_eq!(root.count_children(), 0);
    }

    #[test]
    fn test_leading_content_kept_in_root() {
        let root = build_tree("{{also|Cat}}\n==English==\nbody\n", "cat");
        assert_eq!(root.content(), "{{also|Cat}}\n");
        assert_eq!(root.children()[0].content(), "body\n");
    }

    #[test]
    fn test_node_count_and_depths() {
        let text = "==A==\n===B===\n====C====\n===D===\n==E==\n===F===\n";
        let root = build_tree(text, "page");
        assert_eq!(root.count_children(), 6);

        let depths: Vec<(String, usize)> = root
            .walk()
            .skip(1)
            .map(|s| (s.title().to_string(), s.depth()))
            .collect();
        assert_eq!(
            depths,
            vec![
                ("A".to_string(), 2),
                ("B".to_string(), 3),
                ("C".to_string(), 4),
                ("D".to_string(), 3),
                ("E".to_string(), 2),
                ("F".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_children_are_one_level_deeper() {
        let text = "==A==\n===B===\n====C====\n===D===\n==E==\n";
        let root = build_tree(text, "page");
        for section in root.walk().skip(1) {
            for child in section.children() {
                assert_eq!(child.depth(), section.depth() + 1);
            }
        }
        let a = &root.children()[0];
        let titles: Vec<&str> = a.children().iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["B", "D"]);
    }

    #[test]
    fn test_content_stops_at_next_heading_of_any_depth() {
        let text = "==A==\na text\n===B===\nb text\n==C==\nc text";
        let root = build_tree(text, "page");
        let a = &root.children()[0];
        assert_eq!(a.content(), "a text\n");
        assert_eq!(a.children()[0].content(), "b text\n");
        assert_eq!(root.children()[1].content(), "c text");
    }

    #[test]
    fn test_skipped_level_attaches_to_nearest_shallower() {
        let text = "==A==\n====Deep====\n==B==\n";
        let root = build_tree(text, "page");
        let a = &root.children()[0];
        assert_eq!(a.children()[0].title(), "Deep");
        // Keeps its own depth rather than being renumbered to A's depth + 1.
        assert_eq!(a.depth(), 1);
        assert_eq!(a.children()[0].depth(), 2);
        assert_eq!(root.children()[1].title(), "B");
    }

    #[test]
    fn test_root_title_normalized() {
        let root = build_tree("", " {{page}} ");
        assert_eq!(root.title(), "page");
    }
}
