//! Search Backend Trait
//!
//! Interface for search engines. Implementations are in the infra layer.

use kernel::validation::SearchQuery;

use crate::domain::entities::{SearchHit, SearchSource};
use crate::error::SearchResult;

#[trait_variant::make(SearchBackend: Send)]
pub trait LocalSearchBackend {
    fn source(&self) -> SearchSource;

    /// Return at most `count` hits for `query`
    async fn search(&self, query: &SearchQuery, count: u8) -> SearchResult<Vec<SearchHit>>;
}
