//! # Trait Seams
//!
//! The two engines in this crate meet their callers at two traits:
//!
//! ```text
//!   ┌──────────────────────────────────────┐      ┌──────────────────────────────────────┐
//!   │        MemoStatsSource               │      │          Transition<S>               │
//!   │                                      │      │                                      │
//!   │  cache_name(&) → Option<&str>        │      │  type Phase: Eq + Hash + Clone       │
//!   │  cache_size(&) → usize               │      │  pending_phase(&, step) → Phase      │
//!   │  stats(&) → MemoStats                │      │  apply(&mut, &S, step) → S           │
//!   └──────────────────┬───────────────────┘      └──────────────────┬───────────────────┘
//!                      │                                             │
//!                      ▼                                             ▼
//!   ┌──────────────────────────────────────┐      ┌──────────────────────────────────────┐
//!   │  KeyedCache<K, R>                    │      │  FnTransition<F>   (Phase = ())      │
//!   │  (held weakly by CacheRegistry)      │      │  RoundRobin<S>     (Phase = usize)   │
//!   └──────────────────────────────────────┘      └──────────────────────────────────────┘
//! ```
//!
//! `MemoStatsSource` is the only view the [`CacheRegistry`] has of a cache,
//! so the registry can hold caches of every key/result type behind one
//! `Weak<dyn MemoStatsSource>` list.
//!
//! `Transition` separates *which* sub-operation is pending from *applying*
//! it, so the cycle detector can key on `(phase, state)` instead of `state`
//! alone. A state that recurs under a different pending phase is not a cycle.
//!
//! [`CacheRegistry`]: crate::memo::CacheRegistry

use std::hash::Hash;

use crate::memo::MemoStats;

/// Read-only statistics view over a memo cache.
///
/// Implementations must not mutate or extend the cache when queried.
pub trait MemoStatsSource {
    /// Human-readable name used in diagnostics, if one was given.
    fn cache_name(&self) -> Option<&str>;

    /// Current number of stored entries.
    fn cache_size(&self) -> usize;

    /// Snapshot of `(name, size)`.
    fn stats(&self) -> MemoStats {
        MemoStats::new(self.cache_name().map(str::to_owned), self.cache_size())
    }

    /// Snapshot of the cache's access counters.
    #[cfg(feature = "metrics")]
    fn metrics_snapshot(&self) -> crate::metrics::snapshot::MemoMetricsSnapshot;
}

/// A deterministic state transition, possibly made of several sub-operations.
///
/// `step` is the 0-based index of the transition about to be applied: the
/// first call to [`apply`](Self::apply) receives `step == 0` and turns
/// `history[0]` into `history[1]`.
///
/// # Contract
///
/// - `apply` must be pure with respect to `(pending_phase(step), state)`.
/// - `pending_phase` must depend only on `step`.
///
/// Violating either makes cycle detection silently return wrong states.
pub trait Transition<S> {
    /// Identity of the pending sub-operation.
    type Phase: Eq + Hash + Clone;

    /// Returns the identity of the sub-operation applied at `step`.
    fn pending_phase(&self, step: u64) -> Self::Phase;

    /// Applies the sub-operation for `step` to `state`.
    fn apply(&mut self, state: &S, step: u64) -> S;
}
