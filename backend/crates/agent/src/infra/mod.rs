//! Agent Infrastructure

pub mod openai;

pub use openai::OpenAiChatModel;
