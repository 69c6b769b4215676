//! HTML search fallback
//!
//! Scrapes the DuckDuckGo HTML endpoint. Used when the Custom Search API is
//! not configured or fails; it needs no credentials and has no quota.

use std::time::Duration;

use kernel::validation::SearchQuery;

use crate::domain::{SearchBackend, SearchHit, SearchSource};
use crate::error::SearchResult;
use crate::infra::result_page::ResultPageParser;

pub const DUCKDUCKGO_HTML_BASE_URL: &str = "https://html.duckduckgo.com";

/// Pause before each request to stay polite with the public endpoint
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct HtmlFallbackBackend {
    client: reqwest::Client,
    base_url: String,
    request_delay: Duration,
    parser: ResultPageParser,
}

impl HtmlFallbackBackend {
    pub fn new(client: reqwest::Client) -> SearchResult<Self> {
        Ok(Self {
            client,
            base_url: DUCKDUCKGO_HTML_BASE_URL.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            parser: ResultPageParser::new()?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
}

impl SearchBackend for HtmlFallbackBackend {
    fn source(&self) -> SearchSource {
        SearchSource::HtmlFallback
    }

    async fn search(&self, query: &SearchQuery, count: u8) -> SearchResult<Vec<SearchHit>> {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let body = self
            .client
            .get(format!("{}/html/", self.base_url))
            .query(&[("q", query.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let hits = self.parser.parse(&body, count as usize);
        tracing::info!(results = hits.len(), "Fallback search returned results");
        Ok(hits)
    }
}
