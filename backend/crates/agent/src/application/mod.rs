//! Agent Application Layer

pub mod config;
pub mod manager;
