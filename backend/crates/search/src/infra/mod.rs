//! Search Infrastructure
//!
//! HTTP implementations of `SearchBackend`.

pub mod google_cse;
pub mod html_fallback;
pub mod result_page;

pub use google_cse::GoogleCseBackend;
pub use html_fallback::HtmlFallbackBackend;
