//! Template (`{{...}}`) classification and formatting.
//!
//! A template body is split on `|` into segments; the first segment names the
//! template. The name decides which sub-formatter renders the remaining
//! arguments. Unknown names fall through to the generic formatter, so every
//! template produces some output.

use super::style::Styler;

/// The rendering family a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// `quote-book`, `quote-web`, `cite-journal`, ...
    Quotation,
    /// Cross-reference and qualifier markers such as `lb` or `q`.
    Label,
    /// `l`, `m` and friends: a link to another entry.
    Link,
    /// Inline usage examples (`ux`, `coi`).
    Example,
    /// `w`: a link to a Wikipedia article.
    Wikipedia,
    Generic,
}

const LABEL_NAMES: &[&str] = &[
    "lb", "lbl", "label", "q", "qual", "qualifier", "i", "gloss", "sense",
];
const LINK_NAMES: &[&str] = &["l", "link", "m", "mention", "l-self"];
const EXAMPLE_NAMES: &[&str] = &["ux", "uxi", "coi", "co"];

impl TemplateKind {
    pub fn classify(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        if name.starts_with("quote-") || name.starts_with("cite-") {
            TemplateKind::Quotation
        } else if LABEL_NAMES.contains(&name.as_str()) {
            TemplateKind::Label
        } else if LINK_NAMES.contains(&name.as_str()) {
            TemplateKind::Link
        } else if EXAMPLE_NAMES.contains(&name.as_str()) {
            TemplateKind::Example
        } else if name == "w" {
            TemplateKind::Wikipedia
        } else {
            TemplateKind::Generic
        }
    }
}

/// Formats template spans for one render call.
#[derive(Debug, Clone)]
pub struct TemplateFormatter<'a> {
    styler: Styler,
    language_codes: &'a [String],
    show_quotations: bool,
}

impl<'a> TemplateFormatter<'a> {
    /// `language_codes` are the segment values treated as language-code
    /// parameters and stripped from the output.
    pub fn new(styler: Styler, language_codes: &'a [String], show_quotations: bool) -> Self {
        Self {
            styler,
            language_codes,
            show_quotations,
        }
    }

    fn is_language_code(&self, segment: &str) -> bool {
        self.language_codes.iter().any(|code| code == segment)
    }

    /// Render a whole `{{...}}` span, braces included.
    pub fn format_span(&self, span: &str) -> String {
        let body = span
            .strip_prefix("{{")
            .and_then(|s| s.strip_suffix("}}"))
            .unwrap_or(span);
        self.format_body(body)
    }

    /// Render the text between the braces.
    pub fn format_body(&self, body: &str) -> String {
        let segments: Vec<&str> = body
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let Some((name, args)) = segments.split_first() else {
            return String::new();
        };

        match TemplateKind::classify(name) {
            TemplateKind::Quotation => self.quotation(name, args),
            TemplateKind::Label => {
                let args = self.without_leading_language(args);
                self.styler
                    .accent_italic(&format!("({})", args.join(", ")))
            }
            TemplateKind::Link => {
                let args = positional(self.without_leading_language(args));
                self.styler.accent(&args.join(", "))
            }
            TemplateKind::Example => {
                let args = positional(self.without_leading_language(args));
                self.styler.accent_italic(&args.join(", "))
            }
            TemplateKind::Wikipedia => {
                let target = args.last().copied().unwrap_or(*name);
                self.styler.accent(target)
            }
            TemplateKind::Generic => {
                let kept: Vec<&str> = segments
                    .iter()
                    .copied()
                    .filter(|s| !self.is_language_code(s))
                    .collect();
                self.styler
                    .accent_italic(&format!("({})", kept.join(", ")))
            }
        }
    }

    fn without_leading_language<'s>(&self, args: &'s [&'s str]) -> &'s [&'s str] {
        match args.first() {
            Some(first) if self.is_language_code(first) => &args[1..],
            _ => args,
        }
    }

    /// Quotation citations are suppressed unless quotations were requested.
    fn quotation(&self, name: &str, args: &[&str]) -> String {
        if !self.show_quotations {
            return String::new();
        }

        let named = |key: &str| {
            args.iter()
                .find_map(|arg| arg.strip_prefix(key).and_then(|v| v.strip_prefix('=')))
                .map(str::trim)
                .unwrap_or("")
        };
        let passage = match named("passage") {
            "" => named("text"),
            passage => passage,
        };

        let kind = capitalize(&name.replacen('-', " ", 1));
        let source = format!("({} \"{}\", {})", kind, named("title"), named("year"));
        format!("{} \"{}\"", self.styler.dim(&source), passage)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop `key=value` arguments, keeping positional ones.
fn positional<'s>(args: &'s [&'s str]) -> Vec<&'s str> {
    args.iter().copied().filter(|arg| !arg.contains('=')).collect()
}
