//! Reserved path keywords.
//!
//! A keyword segment stands for several concrete titles taken from the
//! language table. A path containing one expands into one path per title
//! before it is parsed.

use strum::EnumString;

use crate::lang::Language;

/// Reserved segment values, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Keyword {
    /// Every word-class section.
    #[strum(serialize = "definitions", serialize = "defs")]
    Definitions,
    /// The translations section.
    #[strum(serialize = "translations", serialize = "tr")]
    Translations,
}

impl Keyword {
    pub fn titles(self, language: &Language) -> Vec<&'static str> {
        match self {
            Keyword::Definitions => language.word_classes.to_vec(),
            Keyword::Translations => vec![language.translations],
        }
    }
}

/// Expand every keyword segment of `path` into concrete paths.
///
/// Paths without keywords come back unchanged as a single entry. Separators
/// are preserved, so a trailing separator still requests structure output on
/// every expanded path.
pub fn expand(path: &str, separator: &str, language: &Language) -> Vec<String> {
    if separator.is_empty() {
        return vec![path.to_string()];
    }

    let mut expanded = vec![String::new()];
    for (i, segment) in path.split(separator).enumerate() {
        let alternatives: Vec<String> = match segment.trim().parse::<Keyword>() {
            Ok(keyword) => keyword
                .titles(language)
                .into_iter()
                .map(str::to_string)
                .collect(),
            Err(_) => vec![segment.to_string()],
        };

        let mut next = Vec::with_capacity(expanded.len() * alternatives.len());
        for prefix in &expanded {
            for alternative in &alternatives {
                if i == 0 {
                    next.push(alternative.clone());
                } else {
                    next.push(format!("{prefix}{separator}{alternative}"));
                }
            }
        }
        expanded = next;
    }

    expanded
}
