//! MediaWiki action API client.
//!
//! Pages are fetched with `action=parse&prop=wikitext` and searches use
//! `action=opensearch` with the fuzzy profile. Responses are decoded by
//! free functions so they can be checked without a network.

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use super::{FetchError, Page, PageSource, Site};

/// Sent when no user agent is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("wikterm/", env!("CARGO_PKG_VERSION"));

/// Bounds the API accepts for `limit`.
pub const SEARCH_LIMIT_RANGE: std::ops::RangeInclusive<u16> = 1..=500;

/// API error code for a page that does not exist.
const MISSING_TITLE: &str = "missingtitle";

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsedPage>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    title: String,
    pageid: u64,
    wikitext: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

/// Decode an `action=parse` response body.
pub fn parse_page_response(
    body: &str,
    language: &str,
    site: Site,
) -> Result<Option<Page>, FetchError> {
    let response: ParseResponse =
        serde_json::from_str(body).map_err(|err| FetchError::Response(err.to_string()))?;

    match (response.parse, response.error) {
        (Some(parsed), _) => Ok(Some(Page {
            title: parsed.title,
            id: parsed.pageid,
            text: parsed.wikitext,
            language: language.to_string(),
            site,
        })),
        (None, Some(error)) if error.code == MISSING_TITLE => Ok(None),
        (None, Some(error)) => Err(FetchError::Api {
            code: error.code,
            info: error.info,
        }),
        (None, None) => Err(FetchError::Response(
            "neither `parse` nor `error` in response".to_string(),
        )),
    }
}

/// Decode an `action=opensearch` response body: `[query, [titles], ...]`.
pub fn parse_search_response(body: &str) -> Result<Vec<String>, FetchError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|err| FetchError::Response(err.to_string()))?;

    let titles = value
        .get(1)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| FetchError::Response("opensearch result has no title list".to_string()))?;

    Ok(titles
        .iter()
        .filter_map(|title| title.as_str().map(str::to_string))
        .collect())
}

/// Client for one language edition of one site.
#[derive(Debug, Clone)]
pub struct WikiApi {
    client: Client,
    endpoint: Url,
    language: String,
    site: Site,
    search_limit: u16,
}

impl WikiApi {
    /// `search_limit` is clamped to what the API accepts.
    pub fn new(
        language: &str,
        site: Site,
        user_agent: &str,
        search_limit: u16,
    ) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            endpoint: site.api_url(language)?,
            language: language.to_string(),
            site,
            search_limit: search_limit.clamp(*SEARCH_LIMIT_RANGE.start(), *SEARCH_LIMIT_RANGE.end()),
        })
    }

    fn base_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("formatversion", "2");
        url
    }

    pub fn page_url(&self, name: &str) -> Url {
        let mut url = self.base_url();
        url.query_pairs_mut()
            .append_pair("action", "parse")
            .append_pair("page", name)
            .append_pair("prop", "wikitext")
            .append_pair("redirects", "1");
        url
    }

    pub fn search_url(&self, query: &str) -> Url {
        let mut url = self.base_url();
        url.query_pairs_mut()
            .append_pair("action", "opensearch")
            .append_pair("search", query)
            .append_pair("limit", &self.search_limit.to_string())
            .append_pair("profile", "fuzzy");
        url
    }

    fn get(&self, url: Url) -> Result<String, FetchError> {
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send()?.error_for_status()?.text()?)
    }
}

impl PageSource for WikiApi {
    fn fetch(&self, name: &str) -> Result<Option<Page>, FetchError> {
        let body = self.get(self.page_url(name))?;
        parse_page_response(&body, &self.language, self.site)
    }

    fn search(&self, query: &str) -> Result<Vec<String>, FetchError> {
        let body = self.get(self.search_url(query))?;
        parse_search_response(&body)
    }
}
