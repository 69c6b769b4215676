//! Agent Module
//!
//! Layering:
//! - `domain/` - Chat messages, check reports, the `ChatModel` capability
//! - `application/` - `BackgroundCheckManager` keeping the conversation
//! - `infra/` - OpenAI-compatible chat completion client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::config::AgentConfig;
pub use application::manager::{BackgroundCheckManager, SYSTEM_PROMPT};
pub use domain::{ChatMessage, ChatModel, CheckReport, CheckStatus, Role};
pub use error::{AgentError, AgentResult};
pub use infra::OpenAiChatModel;
