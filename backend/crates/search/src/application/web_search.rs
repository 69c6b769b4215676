//! Web Search Use Case
//!
//! Flow:
//! 1. Validate query and result count
//! 2. Serve from cache when a fresh response exists
//! 3. Call the primary backend through the throttle (quota-bound API)
//! 4. On failure or without a primary, call the fallback directly and cache
//!    its response under the same key

use std::sync::Arc;

use kernel::validation::SearchQuery;
use platform::{CacheKey, RateLimitedCache, Serialization, Throttle};

use crate::application::config::SearchConfig;
use crate::domain::{SearchBackend, SearchResponse};
use crate::error::{SearchError, SearchResult};
use crate::infra::{GoogleCseBackend, HtmlFallbackBackend};

/// Largest `count` accepted by `search_web`
pub const MAX_RESULTS: u8 = 10;

/// Default number of results
pub const DEFAULT_RESULTS: u8 = 5;

#[derive(Debug)]
pub struct WebSearchTool<P = GoogleCseBackend, F = HtmlFallbackBackend> {
    primary: Option<P>,
    fallback: F,
    cache: RateLimitedCache<SearchResponse>,
}

impl WebSearchTool {
    /// Build the tool with HTTP backends
    ///
    /// The Custom Search API is used only when both credentials are set.
    pub fn from_config(config: &SearchConfig) -> SearchResult<Self> {
        let client = platform::client::build_http_client(&config.http)?;

        let primary = match config.credentials() {
            Some((key, cx)) => Some(
                GoogleCseBackend::new(client.clone(), key, cx)?
                    .with_base_url(config.google_base_url.as_str()),
            ),
            None => {
                tracing::info!("Google CSE credentials not set, using fallback search only");
                None
            }
        };

        let fallback = HtmlFallbackBackend::new(client)?
            .with_base_url(config.fallback_base_url.as_str())
            .with_request_delay(config.fallback_delay);

        let throttle = Arc::new(Throttle::from_settings(
            &config.throttle,
            Serialization::Exclusive,
        )?);
        let cache = RateLimitedCache::new("web_search", config.throttle.cache_config(), throttle)?;

        Ok(Self::new(primary, fallback, cache))
    }
}

impl<P, F> WebSearchTool<P, F>
where
    P: SearchBackend,
    F: SearchBackend,
{
    pub fn new(primary: Option<P>, fallback: F, cache: RateLimitedCache<SearchResponse>) -> Self {
        Self {
            primary,
            fallback,
            cache,
        }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Search the web for `query`, returning at most `count` hits
    ///
    /// ## Errors
    /// * `InvalidQuery` / `InvalidCount` - rejected before any call
    /// * Fallback failure - when the fallback is the last resort and fails
    pub async fn search_web(&self, query: &str, count: u8) -> SearchResult<SearchResponse> {
        let query = SearchQuery::parse(query)?;
        if !(1..=MAX_RESULTS).contains(&count) {
            return Err(SearchError::InvalidCount(count));
        }

        let key = CacheKey::new("web_search")
            .arg(query.as_str())
            .arg(count.to_string());

        if let Some(cached) = self.cache.cached(&key).await {
            tracing::debug!(key = %key, "Serving search from cache");
            return Ok(cached);
        }

        if let Some(primary) = &self.primary {
            let result: SearchResult<SearchResponse> = self
                .cache
                .fetch(&key, || async {
                    let results = primary.search(&query, count).await?;
                    Ok(SearchResponse {
                        query: query.to_string(),
                        source: primary.source(),
                        results,
                    })
                })
                .await;

            match result {
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        backend = ?primary.source(),
                        "Primary search failed, falling back to basic search"
                    );
                }
            }
        }

        let results = self.fallback.search(&query, count).await?;
        let response = SearchResponse {
            query: query.to_string(),
            source: self.fallback.source(),
            results,
        };
        self.cache.store(&key, response.clone()).await;
        Ok(response)
    }
}
