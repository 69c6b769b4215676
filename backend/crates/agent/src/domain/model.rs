//! Chat Model Trait
//!
//! Interface for a hosted chat-completion model. Implementation is in the
//! infra layer.

use crate::domain::message::ChatMessage;
use crate::error::AgentResult;

#[trait_variant::make(ChatModel: Send)]
pub trait LocalChatModel {
    fn model_name(&self) -> &str;

    /// Complete the conversation and return the assistant's reply
    async fn complete(&self, messages: &[ChatMessage]) -> AgentResult<String>;
}
