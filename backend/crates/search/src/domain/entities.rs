//! Search Entities

use serde::{Deserialize, Serialize};

/// Maximum characters kept from a result title
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum characters kept from a result snippet
pub const SNIPPET_MAX_CHARS: usize = 300;

/// One search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl SearchHit {
    /// Build a hit, capping title and snippet length
    pub fn new(title: &str, link: impl Into<String>, snippet: &str) -> Self {
        Self {
            title: truncate_chars(title, TITLE_MAX_CHARS),
            link: link.into(),
            snippet: truncate_chars(snippet, SNIPPET_MAX_CHARS),
        }
    }
}

/// Which backend produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    GoogleCse,
    HtmlFallback,
}

/// Response of `WebSearchTool::search_web`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub source: SearchSource,
    pub results: Vec<SearchHit>,
}

impl SearchResponse {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
