//! Page lookup: local cache first, then the wiki.
//!
//! A [`Lookup`] ties one [`PageSource`] (usually a [`WikiApi`]) to the
//! optional page cache and search history, and applies the cache policy.
//!
//! [`WikiApi`]: crate::source::WikiApi

use thiserror::Error;

use crate::source::{
    CacheError, FetchError, Page, PageCache, PageSource, SearchHistory, SearchRecord, Site,
};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Cache policy for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupPolicy {
    pub save_pages: bool,
    pub use_saved_pages: bool,
    pub save_searches: bool,
    /// Skip the cache when loading, but still save what was fetched.
    pub force_web: bool,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            save_pages: true,
            use_saved_pages: true,
            save_searches: true,
            force_web: false,
        }
    }
}

pub struct Lookup<S> {
    source: S,
    language: String,
    site: Site,
    cache: Option<PageCache>,
    history: Option<SearchHistory>,
    policy: LookupPolicy,
}

impl<S: PageSource> Lookup<S> {
    pub fn new(source: S, language: &str, site: Site) -> Self {
        Self {
            source,
            language: language.to_string(),
            site,
            cache: None,
            history: None,
            policy: LookupPolicy::default(),
        }
    }

    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_history(mut self, history: SearchHistory) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn record_search(&self, text: &str) {
        let Some(history) = self.history.as_ref().filter(|_| self.policy.save_searches) else {
            return;
        };
        log::info!(
            "Saving search \"{}, {}, {}\"",
            text,
            self.site,
            self.language
        );
        if let Err(err) = history.append(&SearchRecord::now(text, self.site, &self.language)) {
            log::warn!("could not save search: {}", err);
        }
    }

    /// Look up `name`. `Ok(None)` means the page does not exist.
    ///
    /// Failing to read or write the cache never fails the lookup; it is
    /// logged and the wiki is used instead.
    pub fn page(&self, name: &str) -> Result<Option<Page>, LookupError> {
        self.record_search(name);

        if let Some(cache) = &self.cache {
            if self.policy.use_saved_pages && !self.policy.force_web {
                log::info!("Getting page from local cache");
                if let Some(page) = cache.load(name, &self.language, self.site) {
                    return Ok(Some(page));
                }
            }
        }

        log::info!("Getting page from {}", self.site);
        let Some(page) = self.source.fetch(name)? else {
            return Ok(None);
        };

        if let Some(cache) = self.cache.as_ref().filter(|_| self.policy.save_pages) {
            log::info!("Saving page {}", page.title);
            if let Err(err) = cache.store(name, &page) {
                log::warn!("could not save page: {}", err);
            }
        }

        Ok(Some(page))
    }

    /// Titles matching `query` on the wiki.
    pub fn search(&self, query: &str) -> Result<Vec<String>, LookupError> {
        self.record_search(query);
        log::info!("Searching {} with \"{}\"", self.site, query);
        Ok(self.source.search(query)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::time::Duration;

    /// In-memory source that counts fetches.
    struct FakeWiki {
        pages: HashMap<String, String>,
        fetches: Cell<usize>,
    }

    impl FakeWiki {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(name, text)| (name.to_string(), text.to_string()))
                    .collect(),
                fetches: Cell::new(0),
            }
        }
    }

    impl PageSource for &FakeWiki {
        fn fetch(&self, name: &str) -> Result<Option<Page>, FetchError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.pages.get(name).map(|text| Page {
                title: name.to_string(),
                id: 1,
                text: text.clone(),
                language: "en".to_string(),
                site: Site::Wiktionary,
            }))
        }

        fn search(&self, query: &str) -> Result<Vec<String>, FetchError> {
            Ok(self
                .pages
                .keys()
                .filter(|name| name.contains(query))
                .cloned()
                .collect())
        }
    }

    fn stores(dir: &std::path::Path) -> (PageCache, SearchHistory) {
        (
            PageCache::new(dir.join("pages"), Duration::from_secs(3600)),
            SearchHistory::new(dir.join("searches.jsonl")),
        )
    }

    #[test]
    fn test_second_lookup_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let wiki = FakeWiki::new(&[("cat", "==English==\n")]);
        let (cache, history) = stores(dir.path());
        let lookup = Lookup::new(&wiki, "en", Site::Wiktionary)
            .with_cache(cache)
            .with_history(history.clone());

        assert!(lookup.page("cat").unwrap().is_some());
        assert!(lookup.page("cat").unwrap().is_some());
        assert_eq!(wiki.fetches.get(), 1);
        assert_eq!(history.list().unwrap().len(), 2);
    }

    #[test]
    fn test_force_web_skips_cache() {
        let dir = tempfile::tempdir().unwrap();
        let wiki = FakeWiki::new(&[("cat", "text")]);
        let (cache, _) = stores(dir.path());
        let lookup = Lookup::new(&wiki, "en", Site::Wiktionary)
            .with_cache(cache)
            .with_policy(LookupPolicy {
                force_web: true,
                ..LookupPolicy::default()
            });

        lookup.page("cat").unwrap();
        lookup.page("cat").unwrap();
        assert_eq!(wiki.fetches.get(), 2);
    }

    #[test]
    fn test_missing_page_is_none_and_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let wiki = FakeWiki::new(&[]);
        let (cache, _) = stores(dir.path());
        let lookup = Lookup::new(&wiki, "en", Site::Wiktionary).with_cache(cache.clone());

        assert!(lookup.page("nothing").unwrap().is_none());
        assert!(cache.list().unwrap().is_empty());
    }

    #[test]
    fn test_policy_disables_saving() {
        let dir = tempfile::tempdir().unwrap();
        let wiki = FakeWiki::new(&[("cat", "text")]);
        let (cache, history) = stores(dir.path());
        let lookup = Lookup::new(&wiki, "en", Site::Wiktionary)
            .with_cache(cache.clone())
            .with_history(history.clone())
            .with_policy(LookupPolicy {
                save_pages: false,
                save_searches: false,
                ..LookupPolicy::default()
            });

        lookup.page("cat").unwrap();
        assert!(cache.list().unwrap().is_empty());
        assert!(history.list().unwrap().is_empty());
    }

    #[test]
    fn test_search_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let wiki = FakeWiki::new(&[("cat", "a"), ("catalog", "b"), ("dog", "c")]);
        let (_, history) = stores(dir.path());
        let lookup = Lookup::new(&wiki, "en", Site::Wiktionary).with_history(history.clone());

        let mut results = lookup.search("cat").unwrap();
        results.sort();
        assert_eq!(results, vec!["cat", "catalog"]);
        assert_eq!(history.list().unwrap()[0].text, "cat");
    }

    #[test]
    fn test_without_stores_always_fetches() {
        let wiki = FakeWiki::new(&[("cat", "text")]);
        let lookup = Lookup::new(&wiki, "en", Site::Wiktionary);
        lookup.page("cat").unwrap();
        lookup.page("cat").unwrap();
        assert_eq!(wiki.fetches.get(), 2);
    }
}
