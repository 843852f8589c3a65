use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;
use strum::{Display, EnumString};
use supports_color::{Stream, on};
use thiserror::Error;

use crate::render::{DEFAULT_INDENT, RenderOptions};
use crate::source::wiki_api::{DEFAULT_USER_AGENT, SEARCH_LIMIT_RANGE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid expiration {0:?}: expected amounts like \"10d\" or \"1y 2w 3h\"")]
    InvalidExpiration(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub wiki: WikiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Separator between path segments, "." by default
    #[serde(default = "default_path_separator")]
    pub path_separator: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            path_separator: default_path_separator(),
        }
    }
}

fn default_path_separator() -> String {
    ".".to_string()
}

/// When to emit terminal styling codes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorMode {
    /// Style when stdout is a color-capable terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => on(Stream::Stdout).is_some(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Indentation unit for nested definitions
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Show quotation citations under definitions (default: false)
    #[serde(default)]
    pub show_quotations: bool,

    /// Remove blank lines from output (default: false)
    #[serde(default)]
    pub compact: bool,

    #[serde(default)]
    pub color: ColorMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            show_quotations: false,
            compact: false,
            color: ColorMode::default(),
        }
    }
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub save_pages: bool,

    #[serde(default = "default_true")]
    pub use_saved_pages: bool,

    #[serde(default = "default_true")]
    pub save_searches: bool,

    /// How long a saved page stays fresh, e.g. "10d" or "1y 2w"
    #[serde(default = "default_expiration")]
    pub expiration: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            save_pages: true,
            use_saved_pages: true,
            save_searches: true,
            expiration: default_expiration(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_expiration() -> String {
    "10d".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Maximum number of search results (1-500)
    #[serde(default = "default_search_limit")]
    pub search_limit: u16,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_search_limit() -> u16 {
    20
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Parse an expiration such as `"10d"` or `"1y 2m 3w 4d 5h 6min 7s"`.
///
/// Amounts are summed. A month is 30 days and a year 365 days.
///
/// # Examples
///
/// ```
/// # use std::time::Duration;
/// # use wikterm::config::parse_expiration;
/// assert_eq!(parse_expiration("2h 30min").unwrap(), Duration::from_secs(9000));
/// assert!(parse_expiration("soon").is_err());
/// ```
pub fn parse_expiration(text: &str) -> Result<Duration, ConfigError> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"(\d+)\s*(min|y|m|w|d|h|s)\b").unwrap());

    let invalid = || ConfigError::InvalidExpiration(text.to_string());
    if text.trim().is_empty() {
        return Err(invalid());
    }

    let mut seconds: u64 = 0;
    let mut covered = 0;
    for caps in pattern.captures_iter(text) {
        let whole = caps.get(0).ok_or_else(invalid)?;
        if !text[covered..whole.start()].trim().is_empty() {
            return Err(invalid());
        }
        covered = whole.end();

        let amount: u64 = caps[1].parse().map_err(|_| invalid())?;
        let unit = match &caps[2] {
            "y" => 365 * 24 * 60 * 60,
            "m" => 30 * 24 * 60 * 60,
            "w" => 7 * 24 * 60 * 60,
            "d" => 24 * 60 * 60,
            "h" => 60 * 60,
            "min" => 60,
            _ => 1,
        };
        seconds = amount
            .checked_mul(unit)
            .and_then(|part| seconds.checked_add(part))
            .ok_or_else(invalid)?;
    }

    if covered == 0 || !text[covered..].trim().is_empty() {
        return Err(invalid());
    }
    Ok(Duration::from_secs(seconds))
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/wikterm/config.toml
    /// - Linux: ~/.config/wikterm/config.toml
    /// - Windows: %APPDATA%/wikterm/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wikterm").join("config.toml"))
    }

    /// Load config from file, or return default if the file is missing or
    /// malformed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .map(|contents| Self::from_toml(&contents))
            .unwrap_or_default()
    }

    /// Parse TOML contents, falling back to defaults on error
    pub fn from_toml(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|err| {
            log::warn!("ignoring malformed config: {}", err);
            Self::default()
        })
    }

    /// Page freshness window from `cache.expiration`
    pub fn expiration(&self) -> Result<Duration, ConfigError> {
        parse_expiration(&self.cache.expiration)
    }

    /// Search limit clamped to what the API accepts
    pub fn search_limit(&self) -> u16 {
        self.wiki
            .search_limit
            .clamp(*SEARCH_LIMIT_RANGE.start(), *SEARCH_LIMIT_RANGE.end())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent: self.render.indent.clone(),
            show_quotations: self.render.show_quotations,
            compact: self.render.compact,
            color: self.render.color.enabled(),
        }
    }
}
