//! Records Application Layer

pub mod client;
pub mod config;
