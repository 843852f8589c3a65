//! Wikitext section parsing.
//!
//! This module turns the flat text of a wiki page into a tree of
//! [`Section`]s keyed by heading depth.

pub mod builder;
pub mod section;
pub mod utils;

pub use builder::build_tree;
pub use section::{DEFAULT_SEPARATOR, Section, Walk};
