//! Agent Error Types
//!
//! Chat-model error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, conversions::reqwest_error_kind, kind::ErrorKind};
use platform::client::HttpClientError;
use thiserror::Error;

/// Agent result type alias
pub type AgentResult<T> = Result<T, AgentError>;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// Credentials rejected (401/403)
    #[error("Chat model rejected credentials: {0}")]
    Unauthorized(String),

    /// Provider rate limit (429)
    #[error("Chat model rate limit exceeded: {0}")]
    RateLimited(String),

    /// Provider failure (5xx)
    #[error("Chat model unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other non-success status
    #[error("Chat model API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response without any assistant content
    #[error("Chat model returned no content")]
    EmptyResponse,

    #[error("Chat model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Client(#[from] HttpClientError),
}

impl AgentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AgentError::MissingApiKey | AgentError::Client(_) => ErrorKind::Configuration,
            AgentError::Unauthorized(_) => ErrorKind::Unauthorized,
            AgentError::RateLimited(_) => ErrorKind::RateLimited,
            AgentError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            AgentError::Api { .. } | AgentError::EmptyResponse => ErrorKind::Upstream,
            AgentError::Http(e) => reqwest_error_kind(e),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AgentError::Unauthorized(_) | AgentError::MissingApiKey => {
                tracing::error!(error = %self, "Chat model configuration error");
            }
            AgentError::RateLimited(_) | AgentError::ServiceUnavailable(_) => {
                tracing::warn!(error = %self, "Chat model temporarily unavailable");
            }
            _ => {
                tracing::error!(error = %self, "Chat model call failed");
            }
        }
    }
}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        let app_err = AppError::new(err.kind(), err.to_string());
        match err {
            AgentError::MissingApiKey => {
                app_err.with_action("Set OPENAI_API_KEY in the environment or .env file")
            }
            AgentError::Http(e) => app_err.with_source(e),
            _ => app_err,
        }
    }
}
