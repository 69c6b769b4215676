//! Time-to-live Cache
//!
//! Keyed cache whose entries stop being served once they reach `ttl`.
//!
//! Expired entries are removed lazily when read. Keys that are written once
//! and never read again are removed by a full sweep, run from `put` at most
//! once per housekeeping interval.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::{ThrottleError, ThrottleResult};

/// Delimiter between the operation name and each argument of a [`CacheKey`]
pub const KEY_DELIMITER: char = ':';

/// Placeholder for an optional argument that was not supplied
///
/// Starts with `%`, which normalized arguments always escape, so no
/// supplied value can render to it.
pub const KEY_MISSING: &str = "%none";

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries are served while younger than this
    pub ttl: Duration,
    /// Minimum time between two sweeps
    pub housekeeping_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            housekeeping_interval: Duration::from_secs(3600),
        }
    }
}

// ============================================================================
// Cache key
// ============================================================================

/// Cache key built from an operation name and normalized arguments
///
/// Arguments are trimmed and lower-cased so that semantically identical
/// requests collide. The delimiter is escaped inside arguments so that
/// different argument lists never render to the same key.
///
/// ```rust
/// use platform::cache::CacheKey;
///
/// let key = CacheKey::new("legal_actions")
///     .arg("  Acme Corp ")
///     .opt_arg(None::<&str>)
///     .arg(5.to_string());
/// assert_eq!(key.as_str(), "legal_actions:acme corp:%none:5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(operation: &str) -> Self {
        Self(normalize(operation))
    }

    pub fn arg(mut self, value: impl AsRef<str>) -> Self {
        self.0.push(KEY_DELIMITER);
        self.0.push_str(&normalize(value.as_ref()));
        self
    }

    /// Missing values render as [`KEY_MISSING`]
    pub fn opt_arg(mut self, value: Option<impl AsRef<str>>) -> Self {
        match value {
            Some(v) => self.arg(v),
            None => {
                self.0.push(KEY_DELIMITER);
                self.0.push_str(KEY_MISSING);
                self
            }
        }
    }

    /// Append every value, sorted and deduplicated, so order does not matter
    pub fn list_arg<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = values
            .into_iter()
            .map(|v| normalize(v.as_ref()))
            .collect();
        normalized.sort();
        normalized.dedup();
        for value in normalized {
            self.0.push(KEY_DELIMITER);
            self.0.push_str(&value);
        }
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace('%', "%25")
        .replace(KEY_DELIMITER, "%3a")
}

// ============================================================================
// TTL cache
// ============================================================================

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    last_sweep: Instant,
}

/// Keyed cache with per-entry time-to-live
#[derive(Debug)]
pub struct TtlCache<V> {
    config: CacheConfig,
    state: Mutex<CacheState<V>>,
}

impl<V> TtlCache<V>
where
    V: Clone,
{
    /// Create an empty cache
    ///
    /// ## Errors
    /// `InvalidArgument` when `ttl` is zero.
    pub fn new(config: CacheConfig) -> ThrottleResult<Self> {
        if config.ttl.is_zero() {
            return Err(ThrottleError::InvalidArgument("ttl must be positive"));
        }
        Ok(Self {
            config,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the value if it is younger than `ttl`
    ///
    /// An expired entry is removed on the way out.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let fresh = match state.entries.get(key) {
            Some(entry) => now.saturating_duration_since(entry.stored_at) < self.config.ttl,
            None => return None,
        };

        if fresh {
            state.entries.get(key).map(|entry| entry.value.clone())
        } else {
            state.entries.remove(key);
            tracing::trace!(key, "Expired cache entry removed on read");
            None
        }
    }

    /// Store `value`, replacing any previous entry for `key`
    pub async fn put(&self, key: impl Into<String>, value: V) {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        state.entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: now,
            },
        );

        if now.saturating_duration_since(state.last_sweep) > self.config.housekeeping_interval {
            let dropped = sweep_expired(&mut state, now, self.config.ttl);
            tracing::debug!(dropped, remaining = state.entries.len(), "Cache sweep completed");
        }
    }

    /// Sweep now, regardless of the housekeeping interval
    ///
    /// Returns the number of entries dropped.
    pub async fn sweep(&self) -> usize {
        let mut state = self.state.lock().await;
        sweep_expired(&mut state, Instant::now(), self.config.ttl)
    }

    /// Stored entries, including expired ones not purged yet
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn sweep_expired<V>(state: &mut CacheState<V>, now: Instant, ttl: Duration) -> usize {
    let before = state.entries.len();
    state
        .entries
        .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < ttl);
    state.last_sweep = now;
    before - state.entries.len()
}
