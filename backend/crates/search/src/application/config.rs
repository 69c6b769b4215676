//! Search Configuration

use std::time::Duration;

use platform::ThrottleSettings;
use platform::client::HttpClientConfig;

use crate::infra::google_cse::GOOGLE_API_BASE_URL;
use crate::infra::html_fallback::{DEFAULT_REQUEST_DELAY, DUCKDUCKGO_HTML_BASE_URL};

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Custom Search API key; the API is skipped without it
    pub google_api_key: Option<String>,
    /// Custom Search engine id; the API is skipped without it
    pub google_cse_id: Option<String>,
    pub google_base_url: String,
    pub fallback_base_url: String,
    pub fallback_delay: Duration,
    /// Quota and cache settings for the API
    pub throttle: ThrottleSettings,
    pub http: HttpClientConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_cse_id: None,
            google_base_url: GOOGLE_API_BASE_URL.to_string(),
            fallback_base_url: DUCKDUCKGO_HTML_BASE_URL.to_string(),
            fallback_delay: DEFAULT_REQUEST_DELAY,
            throttle: ThrottleSettings::default(),
            http: HttpClientConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Key and engine id, when both are present and non-blank
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.google_api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let cx = self.google_cse_id.as_deref().filter(|c| !c.trim().is_empty())?;
        Some((key, cx))
    }
}
