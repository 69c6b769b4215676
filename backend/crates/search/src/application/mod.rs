//! Search Application Layer

pub mod config;
pub mod web_search;
