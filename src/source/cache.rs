//! On-disk page cache.
//!
//! Each page is one JSON file named after its site, language, and the name it
//! was requested under. Entries older than the configured expiration are
//! ignored on load but left on disk until overwritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::form_urlencoded;

use super::{CacheError, Page, Site};

/// A cached page and when it was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPage {
    /// Name the page was requested under.
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub page: Page,
}

#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
    expiration: Duration,
}

impl PageCache {
    pub fn new(dir: impl Into<PathBuf>, expiration: Duration) -> Self {
        Self {
            dir: dir.into(),
            expiration,
        }
    }

    /// `<cache dir>/wikterm/pages`
    pub fn default_dir() -> Result<PathBuf, CacheError> {
        dirs::cache_dir()
            .map(|dir| dir.join("wikterm").join("pages"))
            .ok_or(CacheError::NoCacheDir)
    }

    fn entry_path(&self, name: &str, language: &str, site: Site) -> PathBuf {
        let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
        self.dir.join(format!("{site}-{language}-{encoded}.json"))
    }

    fn is_expired(&self, saved_at: DateTime<Utc>) -> bool {
        match (Utc::now() - saved_at).to_std() {
            Ok(age) => age > self.expiration,
            // Saved "in the future" (clock change): still fresh.
            Err(_) => false,
        }
    }

    /// Load a fresh copy of `name`, if one is stored.
    ///
    /// Missing, unreadable and expired entries are all `None`; unreadable
    /// ones are logged.
    pub fn load(&self, name: &str, language: &str, site: Site) -> Option<Page> {
        let path = self.entry_path(name, language, site);
        if !path.exists() {
            return None;
        }

        let saved = match read_entry(&path) {
            Ok(saved) => saved,
            Err(err) => {
                log::warn!("ignoring cached page: {}", err);
                return None;
            }
        };

        if self.is_expired(saved.saved_at) {
            log::info!("cached page {:?} has expired", name);
            return None;
        }
        Some(saved.page)
    }

    /// Store `page` under the name it was requested with.
    ///
    /// The file is written to a temporary sibling and renamed into place, so
    /// a crash never leaves a half-written entry.
    pub fn store(&self, name: &str, page: &Page) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(|err| CacheError::io(&self.dir, err))?;

        let path = self.entry_path(name, &page.language, page.site);
        let saved = SavedPage {
            name: name.to_string(),
            saved_at: Utc::now(),
            page: page.clone(),
        };
        let json = serde_json::to_vec(&saved).map_err(|err| CacheError::json(&path, err))?;

        let mut temp_file =
            tempfile::NamedTempFile::new_in(&self.dir).map_err(|err| CacheError::io(&self.dir, err))?;
        temp_file
            .write_all(&json)
            .map_err(|err| CacheError::io(temp_file.path(), err))?;
        temp_file
            .persist(&path)
            .map_err(|err| CacheError::io(&path, err.error))?;
        Ok(())
    }

    /// Every readable entry, newest first. Expired entries are included.
    pub fn list(&self) -> Result<Vec<SavedPage>, CacheError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(CacheError::io(&self.dir, err)),
        };

        let mut pages = Vec::new();
        for entry in entries {
            let path = entry.map_err(|err| CacheError::io(&self.dir, err))?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match read_entry(&path) {
                Ok(saved) => pages.push(saved),
                Err(err) => log::warn!("skipping cache entry: {}", err),
            }
        }

        pages.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(pages)
    }
}

fn read_entry(path: &Path) -> Result<SavedPage, CacheError> {
    let contents = fs::read_to_string(path).map_err(|err| CacheError::io(path, err))?;
    serde_json::from_str(&contents).map_err(|err| CacheError::json(path, err))
}
