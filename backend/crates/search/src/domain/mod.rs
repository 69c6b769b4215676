//! Search Domain
//!
//! Result types and the backend capability implemented in `infra`.

pub mod entities;
pub mod backend;

pub use backend::{LocalSearchBackend, SearchBackend};
pub use entities::{SearchHit, SearchResponse, SearchSource};
