//! Terminal rendering of section content.
//!
//! [`render_section`] runs the full pipeline over one section: continuation
//! joining, the inline markup passes, and the indentation/numbering pass.
//! Every pass degrades to leaving text untouched on malformed markup.

pub mod indent;
pub mod markup;
pub mod matcher;
pub mod style;
pub mod templates;

use crate::lang::template_language_codes;
use crate::parser::Section;
use indent::IndentFormatter;
use markup::{MarkupRenderer, join_continuations};
use style::Styler;
use templates::TemplateFormatter;

/// Indentation unit used when none is configured.
pub const DEFAULT_INDENT: &str = "▏   ";

/// Options for one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Text repeated once per nesting level.
    pub indent: String,
    /// Show quotation citations and quotation lines.
    pub show_quotations: bool,
    /// Drop blank lines.
    pub compact: bool,
    /// Emit terminal styling codes.
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            show_quotations: false,
            compact: false,
            color: true,
        }
    }
}

impl RenderOptions {
    pub fn styler(&self) -> Styler {
        Styler::new(self.color)
    }
}

/// Render `section` for display, headed by its own title.
pub fn render_section(section: &Section, lang_code: &str, options: &RenderOptions) -> String {
    render_section_titled(section, section.title(), lang_code, options)
}

/// Render `section` under a display title, e.g. an annotated query match.
pub fn render_section_titled(
    section: &Section,
    title: &str,
    lang_code: &str,
    options: &RenderOptions,
) -> String {
    let styler = options.styler();
    let codes = template_language_codes(lang_code);
    let renderer = MarkupRenderer::new(
        styler,
        TemplateFormatter::new(styler, &codes, options.show_quotations),
    );

    let content: Vec<&str> = section.content().lines().collect();
    let header = format!("==={title}===");
    let rendered: Vec<String> = std::iter::once(header)
        .chain(join_continuations(&content))
        .map(|line| renderer.render_line(&line))
        .collect();

    let formatted =
        IndentFormatter::new(styler, &options.indent, options.show_quotations).format(&rendered);

    finish(formatted, options)
}

/// Titles of `section` and its subtree, indented by relative depth.
pub fn render_structure(section: &Section, options: &RenderOptions) -> String {
    let styler = options.styler();
    let unit = styler.dim(&options.indent);
    let lines = section
        .outline()
        .into_iter()
        .map(|(level, title)| format!("{}{}", unit.repeat(level), title))
        .collect();
    finish(lines, options)
}

fn finish(lines: Vec<String>, options: &RenderOptions) -> String {
    lines
        .into_iter()
        .filter(|line| !options.compact || !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::build_tree;

    fn plain() -> RenderOptions {
        RenderOptions {
            indent: "|   ".to_string(),
            color: false,
            ..RenderOptions::default()
        }
    }

    fn first_child(text: &str) -> Section {
        build_tree(text, "page").children()[0].clone()
    }

    #[test]
    fn test_plain_content_is_unchanged() {
        let section = first_child("==Notes==\nFirst line.\n\nSecond line.\n");
        assert_eq!(
            render_section(&section, "en", &plain()),
            "Notes\nFirst line.\n\nSecond line."
        );
    }

    #[test]
    fn test_bold_is_styled() {
        let section = first_child("==Noun==\n'''bold'''\n");
        let options = RenderOptions {
            color: true,
            ..plain()
        };
        let styler = options.styler();
        let rendered = render_section(&section, "en", &options);
        let body = rendered.lines().nth(1).unwrap();
        assert_eq!(body, styler.bold("bold"));
    }

    #[test]
    fn test_definition_list() {
        let text = "\
===Noun===
{{en-noun}}

# A small [[feline]].
#: {{ux|en|The cat sat.}}
#* {{quote-book|en|year=1900|title=Cats|passage=Meow.}}
#*: Meow.
## {{lb|en|informal}} A person.
# A [[catamaran|boat]].
";
        let section = build_tree(text, "cat").children()[0].clone();
        assert_eq!(
            render_section(&section, "en", &plain()),
            "\
Noun
(en-noun)

1. A small feline.
|   The cat sat.
|   1. (informal) A person.
2. A boat."
        );
    }

    #[test]
    fn test_quotations_on_request() {
        let text = "===Noun===\n# A cat.\n#* {{quote-book|en|year=1900|title=Cats\n|passage=Meow.}}\n";
        let section = build_tree(text, "cat").children()[0].clone();
        let options = RenderOptions {
            show_quotations: true,
            ..plain()
        };
        assert_eq!(
            render_section(&section, "en", &options),
            "Noun\n1. A cat.\n|   (Quote book \"Cats\", 1900) \"Meow.\""
        );
    }

    #[test]
    fn test_leading_continuation_marker_stays_off_the_header() {
        let section = first_child("==Notes==\n| a table cell\ntext\n");
        assert_eq!(
            render_section(&section, "en", &plain()),
            "Notes\n| a table cell\ntext"
        );
    }

    #[test]
    fn test_compact_drops_blank_lines() {
        let section = first_child("==Notes==\none\n\n\ntwo\n");
        let options = RenderOptions {
            compact: true,
            ..plain()
        };
        assert_eq!(render_section(&section, "en", &options), "Notes\none\ntwo");
    }

    #[test]
    fn test_titled_render_uses_display_title() {
        let section = first_child("==Noun==\n# cat\n");
        assert_eq!(
            render_section_titled(&section, "Noun (Etymology 1)", "en", &plain()),
            "Noun (Etymology 1)\n1. cat"
        );
    }

    #[test]
    fn test_render_structure() {
        let root = build_tree("==English==\n===Noun===\n===Verb===\n==Finnish==\n", "cat");
        assert_eq!(
            render_structure(&root, &plain()),
            "cat\n|   English\n|   |   Noun\n|   |   Verb\n|   Finnish"
        );
        let english = &root.children()[0];
        assert_eq!(
            render_structure(english, &plain()),
            "English\n|   Noun\n|   Verb"
        );
    }

    #[test]
    fn test_unterminated_template_left_raw() {
        let section = first_child("==Noun==\n# a {{l|en|cat\n");
        assert_eq!(
            render_section(&section, "en", &plain()),
            "Noun\n1. a {{l|en|cat"
        );
    }
}
