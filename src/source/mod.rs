//! Where pages come from: the wiki API and the local stores around it.

pub mod cache;
mod error;
pub mod history;
pub mod wiki_api;

pub use cache::{PageCache, SavedPage};
pub use error::{CacheError, FetchError};
pub use history::{SearchHistory, SearchRecord};
pub use wiki_api::WikiApi;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use crate::parser::{Section, build_tree};

/// A wiki family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Site {
    Wiktionary,
    Wikipedia,
}

impl Site {
    /// Action API endpoint for `language`, e.g.
    /// `https://en.wiktionary.org/w/api.php`.
    pub fn api_url(self, language: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{language}.{self}.org/w/api.php"))
    }
}

/// A fetched page with its raw wikitext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub id: u64,
    pub text: String,
    pub language: String,
    pub site: Site,
}

impl Page {
    /// Build the page's section tree, rooted at its title.
    pub fn sections(&self) -> Section {
        build_tree(&self.text, &self.title)
    }
}

/// Something that can look pages up by name.
pub trait PageSource {
    /// Fetch a page. A page that does not exist is `Ok(None)`.
    fn fetch(&self, name: &str) -> Result<Option<Page>, FetchError>;

    /// Titles matching `query`, best first.
    fn search(&self, query: &str) -> Result<Vec<String>, FetchError>;
}
