use clap::{Parser, ValueEnum};

use wikterm::config::ColorMode;
use wikterm::source::Site;

#[derive(Parser, Debug)]
#[command(name = "wikterm")]
#[command(version)]
#[command(about = "Read Wiktionary and Wikipedia pages in the terminal")]
#[command(
    long_about = "wikterm - Fetch a wiki page, pick sections out of it by path, and print\n\
    them as readable, indented text.\n\n\
    A section path names sections from the top of the page down, separated by '.'.\n\
    Each segment is a section title, a section number, '*' (direct subsections) or\n\
    '**' (every section below). A trailing '.' prints the outline instead of the text.\n\n\
    Examples:\n  \
    wikterm dict en cat                      # Outline of the page\n  \
    wikterm dict en cat English.Noun         # The English noun section\n  \
    wikterm dict en cat English.defs         # Every English part of speech\n  \
    wikterm dict en cat English.             # Outline of the English section\n  \
    wikterm wiki en Rust 3                   # Third section of the article\n  \
    wikterm -s dict fi kisa                  # Search titles\n  \
    wikterm --list-pages                     # Pages saved locally"
)]
pub struct Cli {
    /// Which wiki to read
    ///
    ///   dictionary (dict, d)         - Wiktionary
    ///   article (wikipedia, wiki, w) - Wikipedia
    #[arg(required_unless_present_any = ["list_searches", "list_pages"])]
    pub mode: Option<Mode>,

    /// Language edition of the wiki, e.g. "en" or "fi"
    #[arg(required_unless_present_any = ["list_searches", "list_pages"])]
    pub language: Option<String>,

    /// Page title, or the search text with --search
    #[arg(required_unless_present_any = ["list_searches", "list_pages"])]
    pub title: Option<String>,

    /// Section path to print
    ///
    /// Segments are separated by '.' (see `query.path_separator` in the
    /// config). "definitions"/"defs" expands to every part-of-speech title of
    /// the language and "translations"/"tr" to its translations title.
    ///
    /// Examples:
    ///   English.Noun    # A nested section
    ///   English.*       # Every direct subsection
    ///   2.1             # By section number
    ///   English.        # Outline only
    pub path: Option<String>,

    /// Print raw wikitext instead of formatted text
    #[arg(short = 'r', long = "raw")]
    pub raw: bool,

    /// Search for titles matching TITLE instead of printing a page
    #[arg(short = 's', long = "search")]
    pub search: bool,

    /// Fetch from the wiki even when a saved copy is fresh
    ///
    /// The fetched page still replaces the saved copy.
    #[arg(short = 'f', long = "force-web")]
    pub force_web: bool,

    /// List previous searches, oldest first
    #[arg(long = "list-searches")]
    pub list_searches: bool,

    /// List saved pages, newest first
    #[arg(long = "list-pages")]
    pub list_pages: bool,

    /// Remove blank lines from formatted output
    #[arg(short = 'c', long = "compact")]
    pub compact: bool,

    /// Show quotation citations under definitions
    #[arg(long = "quotes")]
    pub quotes: bool,

    /// Log what is being fetched, loaded and saved
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Control styled output
    ///
    ///   auto   - Style when stdout is a color terminal (default)
    ///   always - Always emit styling codes
    ///   never  - Plain text
    #[arg(long = "color", value_name = "WHEN")]
    pub color: Option<ColorArg>,
}

/// Which wiki family a run reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Wiktionary
    #[value(alias = "dict", alias = "d")]
    Dictionary,
    /// Wikipedia
    #[value(alias = "wikipedia", alias = "wiki", alias = "w")]
    Article,
}

impl Mode {
    pub fn site(self) -> Site {
        match self {
            Mode::Dictionary => Site::Wiktionary,
            Mode::Article => Site::Wikipedia,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}
