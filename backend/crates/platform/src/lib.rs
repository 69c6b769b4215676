//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the external
//! service clients:
//! - Sliding-window admission gate and exclusive scope (`rate_limit`, `throttle`)
//! - Time-to-live keyed cache with periodic sweep (`cache`)
//! - Metered cache combining both (`metered`)
//! - Throttle settings with documented defaults (`config`)
//! - Outbound HTTP client construction (`client`)

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod metered;
pub mod rate_limit;
pub mod throttle;

pub use cache::{CacheConfig, CacheKey, TtlCache};
pub use config::ThrottleSettings;
pub use error::{ThrottleError, ThrottleResult};
pub use metered::RateLimitedCache;
pub use rate_limit::{AdmissionGate, RateLimitConfig, SlidingWindowGate};
pub use throttle::{ExclusiveScope, ScopeGuard, Serialization, Throttle};
