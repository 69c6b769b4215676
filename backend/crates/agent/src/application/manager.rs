//! Background Check Manager
//!
//! Sends each request to the chat model together with the system prompt and
//! the conversation so far. The history grows only with completed
//! exchanges; a failed request leaves it unchanged.

use crate::domain::{ChatMessage, ChatModel, CheckReport};
use crate::error::AgentResult;

pub const SYSTEM_PROMPT: &str = "You are an AI assistant that helps with vendor background checks. \
Your role is to coordinate the process of gathering and analyzing information about vendors. \
Use the available tools to search for information and compile comprehensive reports. \
Be thorough and objective in your analysis.";

#[derive(Debug)]
pub struct BackgroundCheckManager<M> {
    model: M,
    system_prompt: String,
    history: Vec<ChatMessage>,
}

impl<M> BackgroundCheckManager<M>
where
    M: ChatModel,
{
    pub fn new(model: M) -> Self {
        Self::with_system_prompt(model, SYSTEM_PROMPT)
    }

    pub fn with_system_prompt(model: M, system_prompt: impl Into<String>) -> Self {
        Self {
            model,
            system_prompt: system_prompt.into(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Ask the model to run a background check on `vendor`
    pub async fn process_request(&mut self, vendor: &str) -> AgentResult<CheckReport> {
        let request = ChatMessage::user(format!("Run a background check on {vendor}"));

        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.as_str()));
        messages.extend(self.history.iter().cloned());
        messages.push(request.clone());

        tracing::info!(vendor, model = self.model.model_name(), "Running background check");
        let report = self.model.complete(&messages).await?;

        self.history.push(request);
        self.history.push(ChatMessage::assistant(report.as_str()));

        Ok(CheckReport::completed(vendor, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckStatus, Role};
    use crate::error::AgentError;
    use std::sync::Mutex;

    /// Records every conversation it receives
    #[derive(Debug, Default)]
    struct ScriptedModel {
        seen: Mutex<Vec<Vec<ChatMessage>>>,
        fail: bool,
    }

    impl ChatModel for ScriptedModel {
        fn model_name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, messages: &[ChatMessage]) -> AgentResult<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            if self.fail {
                return Err(AgentError::ServiceUnavailable("down".into()));
            }
            Ok(format!("report #{}", self.seen.lock().unwrap().len()))
        }
    }

    #[tokio::test]
    async fn test_process_request_returns_completed_report() {
        let mut manager = BackgroundCheckManager::new(ScriptedModel::default());
        let report = manager.process_request("Acme Corp").await.unwrap();

        assert_eq!(report.vendor, "Acme Corp");
        assert_eq!(report.status, CheckStatus::Completed);
        assert_eq!(report.report.as_deref(), Some("report #1"));

        let seen = manager.model().seen.lock().unwrap();
        assert_eq!(seen[0][0].role, Role::System);
        assert_eq!(seen[0][0].content, SYSTEM_PROMPT);
        assert_eq!(seen[0][1].content, "Run a background check on Acme Corp");
    }

    #[tokio::test]
    async fn test_history_carries_across_requests() {
        let mut manager = BackgroundCheckManager::new(ScriptedModel::default());
        manager.process_request("Acme").await.unwrap();
        manager.process_request("Globex").await.unwrap();

        assert_eq!(manager.history().len(), 4);
        let seen = manager.model().seen.lock().unwrap();
        let second = &seen[1];
        assert_eq!(second.len(), 4);
        assert_eq!(second[1].content, "Run a background check on Acme");
        assert_eq!(second[2].role, Role::Assistant);
        assert_eq!(second[3].content, "Run a background check on Globex");
    }

    #[tokio::test]
    async fn test_failure_leaves_history_unchanged() {
        let model = ScriptedModel {
            fail: true,
            ..Default::default()
        };
        let mut manager = BackgroundCheckManager::with_system_prompt(model, "custom");
        let err = manager.process_request("Acme").await.unwrap_err();

        assert!(matches!(err, AgentError::ServiceUnavailable(_)));
        assert!(manager.history().is_empty());
    }
}
