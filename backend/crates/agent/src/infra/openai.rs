//! OpenAI-compatible chat completion client
//!
//! Works with OpenAI and any server exposing `POST {base}/chat/completions`.

use serde::{Deserialize, Serialize};

use crate::application::config::AgentConfig;
use crate::domain::{ChatMessage, ChatModel};
use crate::error::{AgentError, AgentResult};

#[derive(Debug, Clone)]
pub struct OpenAiChatModel {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiChatModel {
    /// ## Errors
    /// * `MissingApiKey` - no key, or a blank one
    /// * `Client` - the HTTP client could not be built
    pub fn from_config(config: &AgentConfig) -> AgentResult<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(AgentError::MissingApiKey)?;

        let client = platform::client::build_http_client(&config.http)?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Provider error message if the body has the usual envelope, else the raw text
fn error_message(body: String) -> String {
    serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body)
}

impl ChatModel for OpenAiChatModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> AgentResult<String> {
        tracing::debug!(model = %self.model, messages = messages.len(), "Sending chat completion request");

        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response.text().await.unwrap_or_default());
            let err = match status.as_u16() {
                401 | 403 => AgentError::Unauthorized(message),
                429 => AgentError::RateLimited(message),
                code if code >= 500 => AgentError::ServiceUnavailable(message),
                code => AgentError::Api {
                    status: code,
                    message,
                },
            };
            err.log();
            return Err(err);
        }

        let body: CompletionResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AgentError::EmptyResponse)
    }
}
