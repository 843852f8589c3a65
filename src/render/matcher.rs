//! Delimiter matching for bracket-like markup.
//!
//! [`match_spans`] finds every well-formed region delimited by an opening and
//! a closing token (for example `{{` and `}}`), including regions nested
//! inside each other. Spans are reported in the order their closing token is
//! resolved, so an inner span always comes before the span that contains it.
//!
//! Malformed input never fails: an opening token without a closer is dropped,
//! and a closing token with nothing open is ignored.

/// Whether an occurrence opens or closes a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Open,
    Close,
}

/// One occurrence of a delimiter token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterMatch<'d> {
    /// Byte offset of the token.
    pub position: usize,
    /// The token itself.
    pub delimiter: &'d str,
    pub role: Role,
}

impl DelimiterMatch<'_> {
    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.position + self.delimiter.len()
    }
}

/// A resolved `start..end` byte range covering both delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The spanned text, delimiters included.
    pub fn as_str<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Scan `text` for delimiter occurrences, leftmost first.
///
/// Occurrences never overlap: once a token is recognised the scan resumes
/// after it. The opening token is tried before the closing one, so when both
/// tokens are equal every occurrence is reported as [`Role::Open`].
pub fn find_delimiters<'d>(text: &str, open: &'d str, close: &'d str) -> Vec<DelimiterMatch<'d>> {
    let mut found = Vec::new();
    if open.is_empty() || close.is_empty() {
        return found;
    }

    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        if rest.starts_with(open) {
            found.push(DelimiterMatch {
                position: pos,
                delimiter: open,
                role: Role::Open,
            });
            pos += open.len();
        } else if rest.starts_with(close) {
            found.push(DelimiterMatch {
                position: pos,
                delimiter: close,
                role: Role::Close,
            });
            pos += close.len();
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    found
}

/// Find all matched regions of `text` delimited by `open` and `close`.
///
/// When `open == close` the roles cannot be told apart, so occurrences are
/// paired strictly in order (first with second, third with fourth) and no
/// nesting is detected.
pub fn match_spans(text: &str, open: &str, close: &str) -> Vec<MatchSpan> {
    let occurrences = find_delimiters(text, open, close);

    if open == close {
        return occurrences
            .chunks_exact(2)
            .map(|pair| MatchSpan::new(pair[0].position, pair[1].end()))
            .collect();
    }

    pair_nested(&occurrences)
}

/// Pair each closer with the innermost opener still pending.
///
/// `pending` holds the indices of unresolved openers and lives only for one
/// call. A closer with nothing pending is ignored; openers left pending at the
/// end have no closer and produce no span.
fn pair_nested(occurrences: &[DelimiterMatch<'_>]) -> Vec<MatchSpan> {
    let mut pending: Vec<usize> = Vec::new();
    let mut spans = Vec::new();

    for (index, occurrence) in occurrences.iter().enumerate() {
        match occurrence.role {
            Role::Open => pending.push(index),
            Role::Close => {
                if let Some(open) = pending.pop() {
                    spans.push(MatchSpan::new(occurrences[open].position, occurrence.end()));
                }
            }
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanned<'t>(text: &'t str, open: &str, close: &str) -> Vec<&'t str> {
        match_spans(text, open, close)
            .iter()
            .map(|span| span.as_str(text))
            .collect()
    }

    #[test]
    fn test_nested_templates_report_inner_then_outer() {
        assert_eq!(
            spanned("{{a{{b}}c}}", "{{", "}}"),
            vec!["{{b}}", "{{a{{b}}c}}"]
        );
    }

    #[test]
    fn test_unterminated_opener_yields_nothing() {
        assert!(match_spans("{{a", "{{", "}}").is_empty());
    }

    #[test]
    fn test_equal_delimiters_pair_in_order() {
        assert_eq!(spanned("''x''", "''", "''"), vec!["''x''"]);
        assert_eq!(
            spanned("''a'' and ''b''", "''", "''"),
            vec!["''a''", "''b''"]
        );
    }

    #[test]
    fn test_equal_delimiters_drop_odd_occurrence() {
        assert_eq!(spanned("'''a''' b'''", "'''", "'''"), vec!["'''a'''"]);
    }

    #[test]
    fn test_stray_closer_is_ignored() {
        assert_eq!(spanned("}}{{a}}", "{{", "}}"), vec!["{{a}}"]);
    }

    #[test]
    fn test_unmatched_outer_keeps_inner_span() {
        assert_eq!(spanned("{{a{{b}}", "{{", "}}"), vec!["{{b}}"]);
    }

    #[test]
    fn test_siblings_in_document_order() {
        assert_eq!(
            spanned("[[a]] and [[b]]", "[[", "]]"),
            vec!["[[a]]", "[[b]]"]
        );
    }

    #[test]
    fn test_multi_character_tags() {
        let text = "word<ref>source</ref> rest";
        assert_eq!(spanned(text, "<ref", "</ref>"), vec!["<ref>source</ref>"]);
    }

    #[test]
    fn test_deep_nesting() {
        let text = "{{a{{b{{c}}}}}}";
        assert_eq!(
            spanned(text, "{{", "}}"),
            vec!["{{c}}", "{{b{{c}}}}", "{{a{{b{{c}}}}}}"]
        );
    }

    #[test]
    fn test_multibyte_text_between_delimiters() {
        assert_eq!(spanned("ä{{ö}}å", "{{", "}}"), vec!["{{ö}}"]);
    }

    #[test]
    fn test_no_delimiters_is_empty() {
        assert!(match_spans("plain text", "{{", "}}").is_empty());
        assert!(match_spans("", "{{", "}}").is_empty());
    }

    #[test]
    fn test_empty_delimiter_is_rejected() {
        assert!(find_delimiters("abc", "", "}}").is_empty());
    }

    #[test]
    fn test_find_delimiters_roles() {
        let found = find_delimiters("{{a}}", "{{", "}}");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].role, Role::Open);
        assert_eq!(found[1].role, Role::Close);
        assert_eq!(found[1].end(), 5);
    }

    #[test]
    fn test_closer_after_unmatched_opener_pairs_inner() {
        assert_eq!(spanned("{{a{{b}}{{c", "{{", "}}"), vec!["{{b}}"]);
    }

    #[test]
    fn test_many_unmatched_openers() {
        let text = format!("{}{{{{x}}}}", "{{".repeat(100_000));
        assert_eq!(spanned(&text, "{{", "}}"), vec!["{{x}}"]);
        assert!(match_spans(&"{{".repeat(100_000), "{{", "}}").is_empty());
    }

    #[test]
    fn test_deeply_nested_spans() {
        let depth = 50_000;
        let text = format!("{}{}", "[[".repeat(depth), "]]".repeat(depth));
        let spans = match_spans(&text, "[[", "]]");
        assert_eq!(spans.len(), depth);
        assert_eq!(spans[0].as_str(&text), "[[]]");
        assert_eq!(spans[depth - 1].as_str(&text), text);
    }
}
