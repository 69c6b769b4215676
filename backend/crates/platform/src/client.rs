//! Outbound HTTP client construction
//!
//! Every external service client (search engines, records API, chat model)
//! goes through [`build_http_client`] so timeouts and identification are
//! consistent.

use std::time::Duration;

use kernel::error::app_error::AppError;

/// Browser-like agent; the HTML search fallback rejects obvious bots
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Outbound client settings
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Error when building the HTTP client
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Timeout must be positive")]
    ZeroTimeout,

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

impl From<HttpClientError> for AppError {
    fn from(err: HttpClientError) -> Self {
        AppError::configuration(err.to_string())
    }
}

/// Build a `reqwest::Client` from settings
///
/// ## Errors
/// * `HttpClientError::ZeroTimeout` - timeout of zero
/// * `HttpClientError::Build` - TLS backend initialization failed
pub fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, HttpClientError> {
    if config.timeout.is_zero() {
        return Err(HttpClientError::ZeroTimeout);
    }

    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout.min(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()?;

    tracing::debug!(timeout = ?config.timeout, "HTTP client built");
    Ok(client)
}
