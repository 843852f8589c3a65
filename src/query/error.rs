//! Query error types.

use thiserror::Error;

/// A path expression that cannot be resolved at all.
///
/// Paths that are well formed but match nothing are not errors; they resolve
/// to an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("path separator must not be empty")]
    EmptySeparator,

    #[error("empty segment in path {path:?}")]
    EmptySegment { path: String },
}
