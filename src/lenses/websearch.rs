//! Web search lens (SearXNG)
//!
//! Keystrokes go through a [`DebouncedSearch`], so the list shows the
//! last completed result set while a newer query is being fetched.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::cache::{DebouncedSearch, Fetcher, RefreshError};
use crate::config::{self, WebSearchConfig};
use crate::lens::{Lens, LensError, launch};
use crate::model::{ActionKind, ContextAction, Entry};

pub const NAME: &str = "Web";
pub const NAMESPACE: &str = "websearch";
const ICON: &str = "󰖟";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One raw result from the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

/// Decode a SearXNG JSON response
pub fn parse_response(data: &[u8]) -> Result<Vec<SearchHit>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_slice(data)?;
    Ok(response.results)
}

/// HTTP client for a SearXNG instance
#[derive(Debug, Clone)]
pub struct SearxngClient {
    config: WebSearchConfig,
}

impl SearxngClient {
    pub fn new(config: WebSearchConfig) -> Self {
        Self { config }
    }

    /// `http://host:port/search?q=<query>&format=json`
    pub fn endpoint(&self, query: &str) -> Result<Url, RefreshError> {
        if !self.config.is_configured() {
            return Err(RefreshError::Config(
                "web search host and port are not set".to_string(),
            ));
        }
        let base = format!("http://{}:{}/search", self.config.host, self.config.port);
        Url::parse_with_params(&base, &[("q", query), ("format", "json")])
            .map_err(|e| RefreshError::Config(format!("invalid endpoint {}: {}", base, e)))
    }
}

impl Fetcher<SearchHit> for SearxngClient {
    fn fetch(&self, query: &str) -> Result<Vec<SearchHit>, RefreshError> {
        let url = self.endpoint(query)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client.get(url).send()?;
        if !response.status().is_success() {
            return Err(RefreshError::Status(response.status().as_u16()));
        }
        let body = response.bytes()?;
        Ok(parse_response(&body)?)
    }
}

/// Host part of a result URL, empty when it does not parse
pub fn extract_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

fn entry_for(hit: &SearchHit) -> Entry {
    Entry::new(
        &hit.url,
        format!("({}) {}", extract_host(&hit.url), hit.title),
        ICON,
        &hit.url,
    )
}

#[derive(Debug)]
pub struct WebSearchLens {
    search: DebouncedSearch<SearchHit>,
}

impl WebSearchLens {
    /// Build from `websearch/config.yaml`
    ///
    /// Without a configured endpoint every fetch fails and the lens stays
    /// empty.
    pub fn from_config() -> Self {
        let cfg: WebSearchConfig = config::lens_config_dir(NAMESPACE)
            .map(|dir| config::load_or_default(&dir.join("config.yaml")))
            .unwrap_or_default();
        if !cfg.is_configured() {
            tracing::info!("web search endpoint not configured");
        }
        let limit = cfg.result_limit();
        Self::new(Box::new(SearxngClient::new(cfg)), limit)
    }

    pub fn new(fetcher: Box<dyn Fetcher<SearchHit>>, limit: usize) -> Self {
        Self {
            search: DebouncedSearch::new(NAMESPACE, fetcher, limit),
        }
    }

    pub fn remote(&self) -> &DebouncedSearch<SearchHit> {
        &self.search
    }
}

impl Lens for WebSearchLens {
    fn name(&self) -> &str {
        NAME
    }

    fn revision(&self) -> u64 {
        self.search.revision()
    }

    fn search(&self, query: &str) -> Result<Vec<Entry>, LensError> {
        let snapshot = self.search.search(query);
        Ok(snapshot.items().iter().map(entry_for).collect())
    }

    fn enter(&self, entry: &Entry) -> Result<(), LensError> {
        launch::open(&entry.id)
    }

    fn context_actions(&self, entry: &Entry) -> Vec<ContextAction> {
        vec![ContextAction::new(
            "Copy URL",
            entry.clone(),
            ActionKind::Copy(entry.id.clone()),
        )]
    }
}
