//! Web Search Module
//!
//! Layering:
//! - `domain/` - Result types and the `SearchBackend` capability
//! - `application/` - Cached, quota-bound `WebSearchTool`
//! - `infra/` - Google Custom Search API and HTML fallback backends

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::config::SearchConfig;
pub use application::web_search::{DEFAULT_RESULTS, MAX_RESULTS, WebSearchTool};
pub use domain::{SearchBackend, SearchHit, SearchResponse, SearchSource};
pub use error::{SearchError, SearchResult};
pub use infra::{GoogleCseBackend, HtmlFallbackBackend};
