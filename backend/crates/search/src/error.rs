//! Search Error Types
//!
//! Search-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, conversions::reqwest_error_kind, kind::ErrorKind};
use kernel::validation::ValidationError;
use platform::ThrottleError;
use platform::client::HttpClientError;
use thiserror::Error;

/// Search result type alias
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Query failed sanitization
    #[error("Invalid search query: {0}")]
    InvalidQuery(#[from] ValidationError),

    /// Result count outside `1..=10`
    #[error("Number of results must be between 1 and 10, got {0}")]
    InvalidCount(u8),

    /// Primary backend selected without key or engine id
    #[error("Google API key and CSE ID are required for this search method")]
    MissingCredentials,

    /// Transport or HTTP status failure
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Unexpected response body
    #[error("Malformed search response: {0}")]
    Malformed(String),

    /// Result-page pattern failed to compile
    #[error("Invalid result pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// HTTP client could not be built
    #[error(transparent)]
    Client(#[from] HttpClientError),

    /// Gate refused the call
    #[error(transparent)]
    Throttle(#[from] ThrottleError),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::InvalidQuery(_) | SearchError::InvalidCount(_) => ErrorKind::Validation,
            SearchError::MissingCredentials | SearchError::Client(_) => ErrorKind::Configuration,
            SearchError::Http(e) => reqwest_error_kind(e),
            SearchError::Malformed(_) => ErrorKind::Upstream,
            SearchError::Pattern(_) => ErrorKind::Internal,
            SearchError::Throttle(e) => e.kind(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Http(e) => AppError::from(e),
            SearchError::Throttle(e) => AppError::from(e),
            SearchError::InvalidQuery(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}
