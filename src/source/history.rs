//! Search history, stored as one JSON object per line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use super::{CacheError, Site};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub text: String,
    pub site: Site,
    pub language: String,
    pub timestamp: DateTime<Utc>,
}

impl SearchRecord {
    pub fn now(text: &str, site: Site, language: &str) -> Self {
        Self {
            text: text.to_string(),
            site,
            language: language.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchHistory {
    path: PathBuf,
}

impl SearchHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/wikterm/searches.jsonl`
    pub fn default_path() -> Result<PathBuf, CacheError> {
        dirs::data_local_dir()
            .map(|dir| dir.join("wikterm").join("searches.jsonl"))
            .ok_or(CacheError::NoCacheDir)
    }

    pub fn append(&self, record: &SearchRecord) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| CacheError::io(parent, err))?;
        }

        let mut line =
            serde_json::to_string(record).map_err(|err| CacheError::json(&self.path, err))?;
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|err| CacheError::io(&self.path, err))
    }

    /// All readable records, oldest first. Malformed lines are skipped.
    pub fn list(&self) -> Result<Vec<SearchRecord>, CacheError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(CacheError::io(&self.path, err)),
        };

        Ok(contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("skipping history line: {}", err);
                    None
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_list_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let history = SearchHistory::new(dir.path().join("nested").join("searches.jsonl"));

        history
            .append(&SearchRecord::now("cat", Site::Wiktionary, "en"))
            .unwrap();
        history
            .append(&SearchRecord::now("kissa", Site::Wikipedia, "fi"))
            .unwrap();

        let records = history.list().unwrap();
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["cat", "kissa"]);
        assert_eq!(records[1].site, Site::Wikipedia);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = SearchHistory::new(dir.path().join("none.jsonl"));
        assert!(history.list().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("searches.jsonl");
        let history = SearchHistory::new(&path);
        history
            .append(&SearchRecord::now("cat", Site::Wiktionary, "en"))
            .unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "garbage").unwrap();

        assert_eq!(history.list().unwrap().len(), 1);
    }
}
