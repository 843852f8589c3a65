//! Terminal styling codes.
//!
//! Every styled fragment is wrapped in an SGR "on" sequence and the matching
//! "off" sequence (not a full reset), so styles nest: an italic template inside
//! a bold span keeps the bold after the italic ends.

use crossterm::style::{Attribute, Color, Colored};

const CSI: &str = "\x1b[";

fn attribute(attr: Attribute) -> String {
    format!("{CSI}{}m", attr.sgr())
}

fn foreground(color: Color) -> String {
    format!("{CSI}{}m", Colored::ForegroundColor(color))
}

/// Produces styled text, or plain text when styling is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styler {
    enabled: bool,
}

impl Default for Styler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Styler {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A styler that never emits control sequences.
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn wrap(&self, text: &str, on: &[String], off: &[String]) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len() + 16);
        on.iter().for_each(|code| out.push_str(code));
        out.push_str(text);
        off.iter().for_each(|code| out.push_str(code));
        out
    }

    /// Emphasis used for `'''bold'''` spans.
    pub fn bold(&self, text: &str) -> String {
        self.wrap(
            text,
            &[attribute(Attribute::Bold)],
            &[attribute(Attribute::NormalIntensity)],
        )
    }

    pub fn italic(&self, text: &str) -> String {
        self.wrap(
            text,
            &[attribute(Attribute::Italic)],
            &[attribute(Attribute::NoItalic)],
        )
    }

    pub fn dim(&self, text: &str) -> String {
        self.wrap(
            text,
            &[attribute(Attribute::Dim)],
            &[attribute(Attribute::NormalIntensity)],
        )
    }

    /// Wiki-links (`[[target]]`).
    pub fn link(&self, text: &str) -> String {
        self.wrap(
            text,
            &[foreground(Color::DarkMagenta)],
            &[foreground(Color::Reset)],
        )
    }

    /// Link-like templates and example lines.
    pub fn accent(&self, text: &str) -> String {
        self.wrap(text, &[foreground(Color::DarkRed)], &[foreground(Color::Reset)])
    }

    /// Labels, usage examples and generic templates.
    pub fn accent_italic(&self, text: &str) -> String {
        self.wrap(
            text,
            &[attribute(Attribute::Italic), foreground(Color::DarkRed)],
            &[attribute(Attribute::NoItalic), foreground(Color::Reset)],
        )
    }

    /// Section headers.
    pub fn heading(&self, text: &str) -> String {
        self.wrap(
            text,
            &[attribute(Attribute::Bold), foreground(Color::DarkBlue)],
            &[attribute(Attribute::NormalIntensity), foreground(Color::Reset)],
        )
    }
}
