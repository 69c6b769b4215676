//! Google Custom Search JSON API backend

use kernel::validation::SearchQuery;
use serde::Deserialize;

use crate::domain::{SearchBackend, SearchHit, SearchSource};
use crate::error::{SearchError, SearchResult};

pub const GOOGLE_API_BASE_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Clone)]
pub struct GoogleCseBackend {
    client: reqwest::Client,
    api_key: String,
    cse_id: String,
    base_url: String,
}

impl GoogleCseBackend {
    /// ## Errors
    /// `MissingCredentials` when the key or engine id is blank.
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        cse_id: impl Into<String>,
    ) -> SearchResult<Self> {
        let api_key = api_key.into();
        let cse_id = cse_id.into();
        if api_key.trim().is_empty() || cse_id.trim().is_empty() {
            return Err(SearchError::MissingCredentials);
        }
        Ok(Self {
            client,
            api_key,
            cse_id,
            base_url: GOOGLE_API_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
    #[serde(rename = "searchInformation")]
    search_information: Option<CseSearchInformation>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct CseSearchInformation {
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "searchTime")]
    search_time: Option<f64>,
}

impl SearchBackend for GoogleCseBackend {
    fn source(&self) -> SearchSource {
        SearchSource::GoogleCse
    }

    async fn search(&self, query: &SearchQuery, count: u8) -> SearchResult<Vec<SearchHit>> {
        let url = format!("{}/customsearch/v1", self.base_url);
        let num = count.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query.as_str()),
                ("num", num.as_str()),
                ("safe", "active"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: CseResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Malformed(e.to_string()))?;

        if let Some(info) = &body.search_information {
            tracing::info!(
                total_results = info.total_results.as_deref().unwrap_or("0"),
                search_time = info.search_time.unwrap_or_default(),
                "Google CSE query completed"
            );
        }

        Ok(body
            .items
            .into_iter()
            .take(count as usize)
            .map(|item| SearchHit::new(&item.title, item.link, &item.snippet))
            .collect())
    }
}
