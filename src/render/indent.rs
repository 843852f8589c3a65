//! Indentation and numbering of definition lists.
//!
//! Definition lines start with a run of `#`. The run length is the nesting
//! depth; a modifier after the run changes the line's role:
//!
//! | prefix at depth 1 | role |
//! | --- | --- |
//! | `#`  | definition, numbered |
//! | `#:` | usage example |
//! | `#*` | quotation source |
//! | `#*:` | quotation body |
//!
//! The pass walks the lines once, keeping one counter per open depth. A line
//! with a longer run opens fresh counters down to its depth, a shorter run
//! closes the deeper ones, and a heading closes everything but the top level.

use super::style::Styler;

pub const DEFINITION_MARKER: char = '#';
pub const HEADER_MARKER: char = '=';

/// What a line is, ignoring its depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'l> {
    /// A header line such as `===Noun===`.
    Heading(&'l str),
    /// No definition marker at all.
    Plain(&'l str),
    Definition(&'l str),
    Example(&'l str),
    QuotationSource(&'l str),
    QuotationBody(&'l str),
}

/// Whether `line` is fully wrapped in header markers.
pub fn is_header_line(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 2 && line.starts_with(HEADER_MARKER) && line.ends_with(HEADER_MARKER)
}

/// Length of the leading `#` run, which is the line's nesting depth.
pub fn marker_depth(line: &str) -> usize {
    line.bytes()
        .take_while(|b| *b == DEFINITION_MARKER as u8)
        .count()
}

pub fn classify(line: &str) -> LineKind<'_> {
    let run = marker_depth(line);
    if run == 0 {
        return if is_header_line(line) {
            LineKind::Heading(line.trim().trim_matches(HEADER_MARKER).trim())
        } else {
            LineKind::Plain(line)
        };
    }

    // `#` is one byte, so the run length doubles as a byte offset.
    let rest = &line[run..];
    if let Some(body) = rest.strip_prefix("*:") {
        LineKind::QuotationBody(body.trim())
    } else if let Some(source) = rest.strip_prefix('*') {
        LineKind::QuotationSource(source.trim())
    } else if rest.starts_with(':') {
        LineKind::Example(rest.trim_start_matches(':').trim())
    } else {
        LineKind::Definition(rest.trim())
    }
}

/// Formats definition lists with indentation and per-depth numbering.
#[derive(Debug, Clone)]
pub struct IndentFormatter {
    styler: Styler,
    unit: String,
    show_quotations: bool,
}

impl IndentFormatter {
    /// `unit` is the text repeated once per indentation level.
    pub fn new(styler: Styler, unit: &str, show_quotations: bool) -> Self {
        Self {
            styler,
            unit: styler.dim(unit),
            show_quotations,
        }
    }

    fn indent(&self, levels: usize) -> String {
        self.unit.repeat(levels)
    }

    pub fn format<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut out = Vec::with_capacity(lines.len());
        // numbers[d - 1] is the next definition number at depth d.
        let mut numbers: Vec<usize> = vec![1];

        for line in lines {
            let kind = classify(line.as_ref());
            match kind {
                LineKind::Heading(_) => {
                    numbers.truncate(1);
                    numbers[0] = 1;
                }
                LineKind::Plain(_) => {}
                _ => numbers.resize(marker_depth(line.as_ref()), 1),
            }
            let depth = numbers.len();

            match kind {
                LineKind::Heading(title) => out.push(self.styler.heading(title)),
                LineKind::Plain(text) => {
                    out.push(format!("{}{}", self.indent(depth - 1), text));
                }
                LineKind::Definition(text) => {
                    let number = &mut numbers[depth - 1];
                    out.push(format!("{}{}. {}", self.indent(depth - 1), number, text));
                    *number += 1;
                }
                LineKind::Example(text) => {
                    out.push(format!("{}{}", self.indent(depth), self.styler.accent(text)));
                }
                LineKind::QuotationSource(text) => {
                    if self.show_quotations {
                        out.push(format!(
                            "{}{}",
                            self.indent(depth),
                            self.styler.accent_italic(text)
                        ));
                    }
                }
                LineKind::QuotationBody(text) => {
                    if self.show_quotations {
                        out.push(format!("{}{}", self.indent(depth + 1), text));
                    }
                }
            }
        }

        out
    }
}
