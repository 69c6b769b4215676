//! Throttle - exclusive scope and admission gate composition
//!
//! Two independent primitives:
//! - [`ExclusiveScope`]: only one caller runs its metered section at a time
//! - [`AdmissionGate`]: bounds how many calls start per trailing window
//!
//! [`Throttle`] composes them according to [`Serialization`]. With
//! `Exclusive` (the default) a caller enters the scope first and then asks
//! the gate for admission, holding the scope until its operation returns.
//! No two metered operations sharing the throttle ever overlap, including
//! independent network calls on cache misses, so throughput is one request
//! at a time. `AdmissionOnly` lets operations overlap and only counts them.

use std::future::Future;

use tokio::sync::{Mutex, MutexGuard};

use crate::config::ThrottleSettings;
use crate::error::{ThrottleError, ThrottleResult};
use crate::rate_limit::{AdmissionGate, SlidingWindowGate};

// ============================================================================
// Exclusive scope
// ============================================================================

/// Scoped mutual exclusion over a metered section
#[derive(Debug, Default)]
pub struct ExclusiveScope {
    lock: Mutex<()>,
}

/// Held while inside the scope; releases it on drop, whatever the exit path
#[derive(Debug)]
pub struct ScopeGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl ExclusiveScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the scope to be free and enter it
    pub async fn enter(&self) -> ScopeGuard<'_> {
        ScopeGuard {
            _guard: self.lock.lock().await,
        }
    }

    /// Enter only if nobody else is inside
    pub fn try_enter(&self) -> Option<ScopeGuard<'_>> {
        self.lock
            .try_lock()
            .ok()
            .map(|guard| ScopeGuard { _guard: guard })
    }
}

// ============================================================================
// Serialization mode
// ============================================================================

/// How metered operations sharing a throttle relate to each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Serialization {
    /// Calls are counted by the gate but may run concurrently
    AdmissionOnly,
    /// Enter the exclusive scope, then admit; operations never overlap
    #[default]
    Exclusive,
}

// ============================================================================
// Throttle
// ============================================================================

/// Gate plus exclusive scope shared by the metered caches of one client
#[derive(Debug)]
pub struct Throttle<G = SlidingWindowGate> {
    gate: G,
    scope: ExclusiveScope,
    serialization: Serialization,
}

impl Throttle<SlidingWindowGate> {
    /// Build a sliding-window throttle from settings
    pub fn from_settings(
        settings: &ThrottleSettings,
        serialization: Serialization,
    ) -> ThrottleResult<Self> {
        settings.validate()?;
        let mut gate = SlidingWindowGate::new(settings.rate_limit_config())?;
        if let Some(max_wait) = settings.max_wait {
            gate = gate.with_max_wait(max_wait);
        }
        Ok(Self::new(gate, serialization))
    }
}

impl<G> Throttle<G>
where
    G: AdmissionGate,
{
    pub fn new(gate: G, serialization: Serialization) -> Self {
        Self {
            gate,
            scope: ExclusiveScope::new(),
            serialization,
        }
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn serialization(&self) -> Serialization {
        self.serialization
    }

    /// Run `op` once admitted
    ///
    /// Errors from `op` are returned untouched; a gate failure is converted
    /// into the caller's error type and `op` is never started.
    pub async fn run<T, E, F, Fut>(&self, op: F) -> Result<T, E>
    where
        E: From<ThrottleError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let _scope = match self.serialization {
            Serialization::Exclusive => Some(self.scope.enter().await),
            Serialization::AdmissionOnly => None,
        };

        let admitted_at = self.gate.admit().await?;
        tracing::debug!(?admitted_at, mode = ?self.serialization, "Metered call admitted");

        op().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::RateLimitConfig;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn throttle(serialization: Serialization) -> Arc<Throttle> {
        let gate = SlidingWindowGate::new(RateLimitConfig::new(100, 60)).unwrap();
        Arc::new(Throttle::new(gate, serialization))
    }

    /// Runs `tasks` overlapping operations and reports the peak concurrency
    async fn peak_concurrency(throttle: Arc<Throttle>, tasks: usize) -> usize {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..tasks)
            .map(|_| {
                let throttle = throttle.clone();
                let active = active.clone();
                let peak = peak.clone();
                tokio::spawn(async move {
                    throttle
                        .run(|| async {
                            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                            peak.fetch_max(now, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(100)).await;
                            active.fetch_sub(1, Ordering::SeqCst);
                            Ok::<_, ThrottleError>(())
                        })
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        peak.load(Ordering::SeqCst)
    }

    #[tokio::test(start_paused = true)]
    async fn test_exclusive_never_overlaps() {
        assert_eq!(peak_concurrency(throttle(Serialization::Exclusive), 4).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admission_only_overlaps() {
        assert_eq!(
            peak_concurrency(throttle(Serialization::AdmissionOnly), 4).await,
            4
        );
    }

    #[tokio::test]
    async fn test_scope_released_on_error() {
        let throttle = throttle(Serialization::Exclusive);
        let result: Result<(), ThrottleError> = throttle
            .run(|| async { Err(ThrottleError::InvalidArgument("boom")) })
            .await;
        assert!(result.is_err());
        assert!(throttle.scope.try_enter().is_some());
    }

    #[tokio::test]
    async fn test_scope_guard_blocks_second_entry() {
        let scope = ExclusiveScope::new();
        let guard = scope.enter().await;
        assert!(scope.try_enter().is_none());
        drop(guard);
        assert!(scope.try_enter().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_gate_failure_skips_operation() {
        let gate = SlidingWindowGate::new(RateLimitConfig::new(1, 60))
            .unwrap()
            .with_max_wait(Duration::from_secs(1));
        let throttle = Throttle::new(gate, Serialization::Exclusive);
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let _ = throttle
                .run(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ThrottleError>(())
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_serialization_is_exclusive() {
        assert_eq!(Serialization::default(), Serialization::Exclusive);
    }
}
