//! Path expressions over a section tree.
//!
//! A path is a list of segments joined by a separator (`.` by default):
//!
//! - `English.Noun`: sections titled `Noun` under a section titled `English`
//! - `3`: the section with ordinal 3 (or a section literally titled `3`)
//! - `English.*`: every direct child of `English`
//! - `English.**.Noun`: `Noun` sections at any depth under `English`
//!
//! Titles compare case-insensitively. A trailing separator asks for the
//! structure of the matches instead of their content.

use super::error::QueryError;
use crate::parser::Section;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Case-insensitive title, stored lowercased.
    Title(String),
    /// A numeric segment. Matches the section with this ordinal, and also a
    /// section whose title is literally the number.
    Ordinal { ordinal: usize, text: String },
    /// `*`
    Children,
    /// `**`
    Descendants,
}

impl Segment {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "*" => Segment::Children,
            "**" => Segment::Descendants,
            _ if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                match raw.parse::<usize>() {
                    Ok(ordinal) => Segment::Ordinal {
                        ordinal,
                        text: raw.to_string(),
                    },
                    // Too large for any ordinal; still a valid title.
                    Err(_) => Segment::Title(raw.to_string()),
                }
            }
            _ => Segment::Title(raw.to_lowercase()),
        }
    }

    /// Whether `section` itself satisfies a title or ordinal segment.
    /// Wildcards select by position, not by predicate, and never match here.
    pub fn matches(&self, section: &Section) -> bool {
        match self {
            Segment::Title(title) => section.title().to_lowercase() == *title,
            Segment::Ordinal { ordinal, text } => {
                section.ordinal() == *ordinal || section.title() == text
            }
            Segment::Children | Segment::Descendants => false,
        }
    }
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPath {
    pub segments: Vec<Segment>,
    /// Set by a trailing separator.
    pub structure_only: bool,
}

impl SectionPath {
    /// Parse `path` using `separator` between segments.
    ///
    /// Leading separators are ignored. An empty path (or one made only of
    /// separators) has no segments and resolves to the starting section.
    ///
    /// # Errors
    ///
    /// [`QueryError::EmptySeparator`] when `separator` is empty, and
    /// [`QueryError::EmptySegment`] when two separators are adjacent inside
    /// the path.
    pub fn parse(path: &str, separator: &str) -> Result<Self, QueryError> {
        if separator.is_empty() {
            return Err(QueryError::EmptySeparator);
        }

        let trimmed = path.trim();
        let structure_only = trimmed.ends_with(separator);
        let body = trimmed
            .trim_start_matches(separator)
            .trim_end_matches(separator);

        if body.trim().is_empty() {
            return Ok(Self {
                segments: Vec::new(),
                structure_only,
            });
        }

        let segments = body
            .split(separator)
            .map(|raw| {
                if raw.trim().is_empty() {
                    Err(QueryError::EmptySegment {
                        path: path.to_string(),
                    })
                } else {
                    Ok(Segment::parse(raw))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            segments,
            structure_only,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let path = SectionPath::parse("English.*.**.3.Noun", ".").unwrap();
        assert_eq!(
            path.segments,
            vec![
                Segment::Title("english".to_string()),
                Segment::Children,
                Segment::Descendants,
                Segment::Ordinal {
                    ordinal: 3,
                    text: "3".to_string()
                },
                Segment::Title("noun".to_string()),
            ]
        );
        assert!(!path.structure_only);
    }

    #[test]
    fn test_signed_numbers_are_titles() {
        assert_eq!(Segment::parse("+1"), Segment::Title("+1".to_string()));
        assert_eq!(Segment::parse("-2"), Segment::Title("-2".to_string()));
        assert_eq!(
            Segment::parse(" 12 "),
            Segment::Ordinal {
                ordinal: 12,
                text: "12".to_string()
            }
        );
        assert_eq!(
            Segment::parse("99999999999999999999999"),
            Segment::Title("99999999999999999999999".to_string())
        );
    }

    #[test]
    fn test_trailing_separator_requests_structure() {
        let path = SectionPath::parse("English.", ".").unwrap();
        assert!(path.structure_only);
        assert_eq!(path.segments.len(), 1);
    }

    #[test]
    fn test_leading_separator_ignored() {
        let path = SectionPath::parse("/English/Noun", "/").unwrap();
        assert_eq!(path.segments.len(), 2);
        assert!(!path.structure_only);
    }

    #[test]
    fn test_empty_path_has_no_segments() {
        let path = SectionPath::parse("", ".").unwrap();
        assert!(path.segments.is_empty());
        let path = SectionPath::parse(".", ".").unwrap();
        assert!(path.segments.is_empty());
        assert!(path.structure_only);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            SectionPath::parse("a.b", ""),
            Err(QueryError::EmptySeparator)
        );
        assert_eq!(
            SectionPath::parse("a..b", "."),
            Err(QueryError::EmptySegment {
                path: "a..b".to_string()
            })
        );
    }

    #[test]
    fn test_multi_character_separator() {
        let path = SectionPath::parse("English::Proper noun", "::").unwrap();
        assert_eq!(
            path.segments[1],
            Segment::Title("proper noun".to_string())
        );
    }
}
