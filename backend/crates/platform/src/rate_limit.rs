//! Rate Limiting Infrastructure
//!
//! Sliding-window admission gate bounding the number of operations
//! permitted within a trailing time window.
//!
//! ## Algorithm
//! 1. Drop every recorded admission at least `window` old (prefix trim).
//! 2. Below capacity: record `now` and return immediately.
//! 3. Saturated: sleep until the oldest admission ages out, then record the
//!    wake-up instant as the admission.
//!
//! The whole sequence runs under one lock per gate, so callers are admitted
//! strictly in arrival order and a saturated wait also queues everyone
//! behind it.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::{ThrottleError, ThrottleResult};

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum admissions allowed in the window
    pub max_requests: u32,
    /// Trailing window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    /// 90 calls per 24 hours, below the free search API tier of 100/day
    fn default() -> Self {
        Self {
            max_requests: 90,
            window: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn validate(&self) -> ThrottleResult<()> {
        if self.max_requests == 0 {
            return Err(ThrottleError::InvalidArgument("capacity must be positive"));
        }
        if self.window.is_zero() {
            return Err(ThrottleError::InvalidArgument("window must be positive"));
        }
        Ok(())
    }
}

/// Counted admission gate
///
/// Implemented by [`SlidingWindowGate`]; the seam exists so metered
/// callers can be exercised against a recording gate.
#[trait_variant::make(AdmissionGate: Send)]
pub trait LocalAdmissionGate {
    /// Wait until the call may proceed, record it and return the admission instant
    async fn admit(&self) -> ThrottleResult<Instant>;
}

/// Sliding-window gate
///
/// Admission timestamps are chronological, so expiry is always a prefix of
/// the queue.
#[derive(Debug)]
pub struct SlidingWindowGate {
    config: RateLimitConfig,
    max_wait: Option<Duration>,
    admissions: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowGate {
    /// Create a gate
    ///
    /// ## Errors
    /// `InvalidArgument` when capacity or window is zero.
    pub fn new(config: RateLimitConfig) -> ThrottleResult<Self> {
        config.validate()?;
        Ok(Self {
            admissions: Mutex::new(VecDeque::with_capacity(config.max_requests as usize)),
            config,
            max_wait: None,
        })
    }

    /// Bound the time a caller may spend waiting for a slot
    ///
    /// A caller that would wait longer fails with
    /// [`ThrottleError::WaitTimeout`] and is not recorded.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Wait (if the window is saturated) and record an admission
    ///
    /// Cancel-safe: a future dropped while sleeping records nothing.
    pub async fn admit(&self) -> ThrottleResult<Instant> {
        let mut admissions = self.admissions.lock().await;

        let now = Instant::now();
        prune(&mut admissions, now, self.config.window);

        if admissions.len() < self.config.max_requests as usize {
            admissions.push_back(now);
            return Ok(now);
        }

        // Saturated: the oldest admission decides when a slot opens.
        let wake_at = match admissions.front() {
            Some(oldest) => *oldest + self.config.window,
            None => now,
        };
        let wait = wake_at.saturating_duration_since(now);

        if let Some(max_wait) = self.max_wait {
            if wait > max_wait {
                tracing::warn!(?wait, ?max_wait, "Rate limit wait exceeds bound");
                return Err(ThrottleError::WaitTimeout { wait, max_wait });
            }
        }

        if !wait.is_zero() {
            tracing::info!(
                ?wait,
                capacity = self.config.max_requests,
                "Rate limit reached, waiting for a free slot"
            );
            tokio::time::sleep_until(wake_at).await;
        }

        let admitted_at = Instant::now();
        prune(&mut admissions, admitted_at, self.config.window);
        admissions.push_back(admitted_at);
        Ok(admitted_at)
    }

    /// Number of admissions inside the trailing window
    pub async fn admitted_in_window(&self) -> usize {
        let mut admissions = self.admissions.lock().await;
        prune(&mut admissions, Instant::now(), self.config.window);
        admissions.len()
    }

    /// Slots left before the next caller has to wait
    pub async fn remaining(&self) -> u32 {
        let used = self.admitted_in_window().await as u32;
        self.config.max_requests.saturating_sub(used)
    }
}

impl AdmissionGate for SlidingWindowGate {
    async fn admit(&self) -> ThrottleResult<Instant> {
        SlidingWindowGate::admit(self).await
    }
}

/// Drop admissions that are at least `window` old
fn prune(admissions: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while admissions
        .front()
        .is_some_and(|t| now.saturating_duration_since(*t) >= window)
    {
        admissions.pop_front();
    }
}
