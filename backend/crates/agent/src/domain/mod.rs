//! Agent Domain

pub mod message;
pub mod model;
pub mod report;

pub use message::{ChatMessage, Role};
pub use model::{ChatModel, LocalChatModel};
pub use report::{CheckReport, CheckStatus};
