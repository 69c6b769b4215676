//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Configuration,
            std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            _ => ErrorKind::Internal,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::upstream(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// reqwest conversions (feature-gated)
// ============================================================================

/// Classify a transport error without consuming it
#[cfg(feature = "reqwest")]
pub fn reqwest_error_kind(err: &reqwest::Error) -> ErrorKind {
    if err.is_timeout() {
        return ErrorKind::Timeout;
    }
    if err.is_connect() {
        return ErrorKind::ServiceUnavailable;
    }
    if err.is_decode() {
        return ErrorKind::Upstream;
    }
    match err.status().map(|s| s.as_u16()) {
        Some(401) | Some(403) => ErrorKind::Unauthorized,
        Some(404) => ErrorKind::NotFound,
        Some(429) => ErrorKind::RateLimited,
        Some(code) if code >= 500 => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::Upstream,
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let message = match reqwest_error_kind(&err) {
            ErrorKind::Timeout => "External request timed out",
            ErrorKind::ServiceUnavailable if err.is_connect() => "External service unreachable",
            ErrorKind::ServiceUnavailable => "External service failed",
            ErrorKind::Unauthorized => "External service rejected credentials",
            ErrorKind::NotFound => "External resource not found",
            ErrorKind::RateLimited => "External service rate limit hit",
            _ if err.is_decode() => "External service returned malformed data",
            _ => "External request failed",
        };
        AppError::new(reqwest_error_kind(&err), message).with_source(err)
    }
}
