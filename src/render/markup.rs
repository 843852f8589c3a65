//! Inline markup passes.
//!
//! Each construct (bold, italic, tags, links, templates) is one pass that asks
//! the delimiter matcher for spans and replaces them. Passes run in a fixed
//! order on a single line; multi-line constructs are first folded onto one
//! line by [`join_continuations`].

use super::matcher::{find_delimiters, match_spans};
use super::style::Styler;
use super::templates::TemplateFormatter;

/// First characters marking a line as the continuation of the previous one.
pub const CONTINUATION_MARKERS: &[char] = &['|', '}', ']'];

/// Fold continuation lines onto the line before them.
///
/// Long templates are wrapped at their `|` separators, so a line whose first
/// non-space character is a continuation marker belongs to the previous line.
pub fn join_continuations<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut joined: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        let trimmed = line.trim_start();
        let continues = trimmed.starts_with(CONTINUATION_MARKERS);

        match joined.last_mut() {
            Some(previous) if continues => previous.push_str(trimmed),
            _ => joined.push(line.to_string()),
        }
    }

    joined
}

/// Replace every `open`..`close` span in `text` with `transform(span)`.
///
/// The first resolved span is replaced and the text is rescanned, so inner
/// spans are rendered before the spans that contain them. The number of
/// rounds is bounded by the delimiter count of the original text.
pub fn replace_spans<F>(text: &str, open: &str, close: &str, transform: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut current = text.to_string();
    let mut budget = find_delimiters(text, open, close).len();

    while budget > 0 {
        let Some(span) = match_spans(&current, open, close).into_iter().next() else {
            break;
        };
        let replacement = transform(span.as_str(&current));
        current.replace_range(span.start..span.end, &replacement);
        budget -= 1;
    }

    current
}

/// Strip exactly one `open` and one `close` token from a span.
fn inner<'t>(span: &'t str, open: &str, close: &str) -> &'t str {
    span.strip_prefix(open)
        .and_then(|s| s.strip_suffix(close))
        .unwrap_or(span)
}

/// Renders the inline markup of single lines.
#[derive(Debug, Clone)]
pub struct MarkupRenderer<'a> {
    styler: Styler,
    templates: TemplateFormatter<'a>,
}

impl<'a> MarkupRenderer<'a> {
    pub fn new(styler: Styler, templates: TemplateFormatter<'a>) -> Self {
        Self { styler, templates }
    }

    /// Run every construct pass over `line`.
    pub fn render_line(&self, line: &str) -> String {
        let line = self.bold(line);
        let line = remove_tag(&line, "ref");
        let line = remove_tag(&line, "code");
        let line = self.italic(&line);
        let line = self.links(&line);
        self.templates(&line)
    }

    pub fn bold(&self, line: &str) -> String {
        replace_spans(line, "'''", "'''", |span| {
            self.styler.bold(inner(span, "'''", "'''"))
        })
    }

    pub fn italic(&self, line: &str) -> String {
        replace_spans(line, "''", "''", |span| {
            self.styler.italic(inner(span, "''", "''"))
        })
    }

    /// `[[target]]` and `[[target|label]]`; the label is what gets shown.
    pub fn links(&self, line: &str) -> String {
        replace_spans(line, "[[", "]]", |span| {
            let body = inner(span, "[[", "]]");
            let label = body.rsplit('|').next().unwrap_or(body);
            self.styler.link(label)
        })
    }

    pub fn templates(&self, line: &str) -> String {
        replace_spans(line, "{{", "}}", |span| self.templates.format_span(span))
    }
}

/// Remove `<tag ...>...</tag>` regions entirely.
pub fn remove_tag(line: &str, tag: &str) -> String {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    replace_spans(line, &open, &close, |_| String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_renderer(codes: &[String]) -> MarkupRenderer<'_> {
        MarkupRenderer::new(
            Styler::plain(),
            TemplateFormatter::new(Styler::plain(), codes, false),
        )
    }

    #[test]
    fn test_join_continuations() {
        let lines = vec!["{{quote-book|en", "|year=1900", "  |title=Cats", "}}", "next"];
        assert_eq!(
            join_continuations(&lines),
            vec!["{{quote-book|en|year=1900|title=Cats}}", "next"]
        );
    }

    #[test]
    fn test_join_leaves_first_line_and_blank_lines() {
        let lines = vec!["|orphan", "", "text"];
        assert_eq!(join_continuations(&lines), vec!["|orphan", "", "text"]);
    }

    #[test]
    fn test_bold_markers_removed() {
        let styler = Styler::new(true);
        let codes = Vec::new();
        let renderer = MarkupRenderer::new(
            styler,
            TemplateFormatter::new(styler, &codes, false),
        );
        assert_eq!(renderer.render_line("'''bold'''"), styler.bold("bold"));
    }

    #[test]
    fn test_bold_italic_run() {
        let styler = Styler::new(true);
        let codes = Vec::new();
        let renderer = MarkupRenderer::new(
            styler,
            TemplateFormatter::new(styler, &codes, false),
        );
        let rendered = renderer.render_line("'''''both'''''");
        assert!(!rendered.contains('\''));
        assert!(rendered.starts_with("\x1b[1m\x1b[3mboth"));
    }

    #[test]
    fn test_ref_and_code_tags_removed() {
        let codes = Vec::new();
        let renderer = plain_renderer(&codes);
        assert_eq!(
            renderer.render_line("A cat.<ref name=\"x\">Source</ref> End<code>x</code>"),
            "A cat. End"
        );
    }

    #[test]
    fn test_piped_link_shows_label() {
        let codes = Vec::new();
        let renderer = plain_renderer(&codes);
        assert_eq!(
            renderer.render_line("a [[feline]] or [[Felis catus|cat]]"),
            "a feline or cat"
        );
    }

    #[test]
    fn test_nested_templates_render_inside_out() {
        let codes = vec!["en".to_string()];
        let renderer = plain_renderer(&codes);
        assert_eq!(
            renderer.render_line("{{gloss|{{l|en|cat}} food}}"),
            "(cat food)"
        );
    }

    #[test]
    fn test_malformed_markup_is_left_in_place() {
        let codes = Vec::new();
        let renderer = plain_renderer(&codes);
        assert_eq!(renderer.render_line("broken {{l|en"), "broken {{l|en");
        assert_eq!(renderer.render_line("[[open only"), "[[open only");
    }

    #[test]
    fn test_plain_line_is_unchanged() {
        let codes = Vec::new();
        let renderer = plain_renderer(&codes);
        assert_eq!(renderer.render_line("just words"), "just words");
    }

    #[test]
    fn test_replace_spans_terminates_when_transform_reinserts() {
        let out = replace_spans("{{a}}", "{{", "}}", |span| span.to_string());
        assert_eq!(out, "{{a}}");
    }
}
