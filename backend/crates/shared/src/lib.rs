//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Cross-cutting validation rules for user supplied input
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all tools.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod validation;
