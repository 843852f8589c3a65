//! # wikterm
//!
//! Terminal reader for Wiktionary and Wikipedia wikitext.
//!
//! This library turns a page's raw wikitext into a tree of sections, selects
//! sections from that tree with dotted paths, and renders section markup as
//! indented, numbered, optionally styled terminal text. It also provides the
//! MediaWiki client and the local page cache used by the `wikterm` binary.
//!
//! ## Example
//!
//! ```rust
//! use wikterm::{RenderOptions, build_tree, query, render_section};
//!
//! let text = "==English==\n===Noun===\n# A small '''feline'''.\n#: The cat sat.\n";
//! let root = build_tree(text, "cat");
//!
//! let result = query::execute(&root, "English.Noun", ".", None).unwrap();
//! assert_eq!(result.matches.len(), 1);
//!
//! let options = RenderOptions {
//!     color: false,
//!     ..RenderOptions::default()
//! };
//! let text = render_section(result.matches[0].section, "en", &options);
//! assert!(text.contains("1. A small feline."));
//! ```

/// Configuration loaded from `config.toml`.
///
/// Covers path separator, rendering, cache and wiki client settings.
pub mod config;

/// Per-language section titles used for keyword expansion.
pub mod lang;

/// Cache-aware page lookup.
pub mod lookup;

/// Section tree building.
///
/// Splits wikitext at its headings and nests the sections by heading depth.
pub mod parser;

/// Section path queries.
///
/// Paths select sections by title, number, or wildcard, one level per segment.
///
/// ## Example
///
/// ```rust
/// use wikterm::{build_tree, query};
///
/// let root = build_tree("==A==\n===B===\n==C==\n", "page");
/// let result = query::execute(&root, "*", ".", None).unwrap();
/// let titles: Vec<&str> = result.matches.iter().map(|m| m.section.title()).collect();
/// assert_eq!(titles, vec!["A", "C"]);
/// ```
pub mod query;

/// Wikitext markup rendering for the terminal.
pub mod render;

/// Page sources: the MediaWiki API, the page cache and search history.
pub mod source;

// Re-export commonly used types for convenience
pub use config::Config;
pub use lookup::Lookup;
pub use parser::{Section, build_tree};
pub use render::{RenderOptions, render_section};
pub use source::{Page, Site};
