//! Agent Configuration

use std::time::Duration;

use platform::client::HttpClientConfig;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    /// OpenAI-compatible endpoint, without the `/chat/completions` suffix
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub http: HttpClientConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            http: HttpClientConfig::default().with_timeout(Duration::from_secs(120)),
        }
    }
}
