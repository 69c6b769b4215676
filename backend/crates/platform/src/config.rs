//! Throttle Configuration
//!
//! Numeric settings consumed by the gate and cache. Values are supplied by
//! the caller at construction time; nothing here reads the environment.

use std::time::Duration;

use crate::cache::CacheConfig;
use crate::error::{ThrottleError, ThrottleResult};
use crate::rate_limit::RateLimitConfig;

/// Settings for one metered client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleSettings {
    /// Maximum calls per window
    pub capacity: u32,
    /// Trailing window for `capacity`
    pub window: Duration,
    /// Maximum age of a cached result
    pub ttl: Duration,
    /// Minimum time between two full cache sweeps
    pub housekeeping_interval: Duration,
    /// Optional bound on how long a caller may wait for the gate
    pub max_wait: Option<Duration>,
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            capacity: 90,
            window: Duration::from_secs(24 * 60 * 60),
            ttl: Duration::from_secs(3600),
            housekeeping_interval: Duration::from_secs(3600),
            max_wait: None,
        }
    }
}

impl ThrottleSettings {
    pub fn validate(&self) -> ThrottleResult<()> {
        self.rate_limit_config().validate()?;
        if self.ttl.is_zero() {
            return Err(ThrottleError::InvalidArgument("ttl must be positive"));
        }
        Ok(())
    }

    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.capacity,
            window: self.window,
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.ttl,
            housekeeping_interval: self.housekeeping_interval,
        }
    }
}
