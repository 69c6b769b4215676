//! Throttle Error Types
//!
//! Errors raised while building or using the admission gate and cache.

use std::time::Duration;

use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Throttle result type alias
pub type ThrottleResult<T> = Result<T, ThrottleError>;

/// Gate and cache errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThrottleError {
    /// Non-positive capacity, window or ttl at construction
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The gate is saturated for longer than the configured bound
    #[error("Rate limit wait of {wait:?} exceeds the allowed {max_wait:?}")]
    WaitTimeout { wait: Duration, max_wait: Duration },
}

impl ThrottleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ThrottleError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ThrottleError::WaitTimeout { .. } => ErrorKind::RateLimited,
        }
    }
}

impl From<ThrottleError> for AppError {
    fn from(err: ThrottleError) -> Self {
        let kind = err.kind();
        let app_err = AppError::new(kind, err.to_string());
        match err {
            ThrottleError::WaitTimeout { .. } => {
                app_err.with_action("Try again once the rate limit window has moved on")
            }
            ThrottleError::InvalidArgument(_) => app_err,
        }
    }
}
