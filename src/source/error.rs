//! Errors raised while fetching or storing pages.

use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to a wiki.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected API response: {0}")]
    Response(String),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },
}

/// Failure reading or writing the local page store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("could not determine a cache directory")]
    NoCacheDir,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed cache entry {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CacheError::Json {
            path: path.into(),
            source,
        }
    }
}
