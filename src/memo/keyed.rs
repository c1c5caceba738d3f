//! Compute-once store mapping a projected key to a computed result.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        KeyedCache<K, R> Layout                              │
//! │                                                                             │
//! │   name: Option<String>          entries: Mutex<FxHashMap<K, R>>             │
//! │                                                                             │
//! │   get_or_compute(key, compute)                                              │
//! │     1. lock, look up key, unlock        ── hit  → return clone of R         │
//! │     2. run compute() with NO lock held  ── miss                             │
//! │     3. lock, insert if still vacant     ── first writer wins                │
//! │                                                                             │
//! │   The lock is never held across step 2, so compute() may call back into    │
//! │   the same cache (recursive memoization) without deadlocking.              │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - **Compute-once** under a single writer: `compute` runs at most once per
//!   distinct key for the cache's lifetime.
//! - **Failure is not cached**: [`try_get_or_compute`](KeyedCache::try_get_or_compute)
//!   stores nothing when the computation fails, so the next call retries.
//! - **Monotonic growth**: no entry is ever removed or replaced.
//!
//! ## Thread Safety
//!
//! `KeyedCache` is `Send + Sync` when `K` and `R` are `Send`. Two threads that
//! miss on the same key concurrently may both compute; the first insert wins
//! and the loser returns the stored value, so callers always observe one
//! result per key. Redundant work is the only cost, given a pure computation.

use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::MemoMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::MemoMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MemoMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::MemoStatsSource;

/// Compute-once map from a derived key to a result.
///
/// # Example
///
/// ```
/// use memokit::memo::KeyedCache;
///
/// let cache: KeyedCache<u64, u64> = KeyedCache::named("squares");
/// assert_eq!(cache.get_or_compute(12, || 144), 144);
///
/// // Second lookup does not run the computation
/// assert_eq!(cache.get_or_compute(12, || unreachable!()), 144);
/// assert_eq!(cache.len(), 1);
/// ```
pub struct KeyedCache<K, R> {
    name: Option<String>,
    entries: Mutex<FxHashMap<K, R>>,
    #[cfg(feature = "metrics")]
    metrics: MemoMetrics,
}

impl<K, R> KeyedCache<K, R>
where
    K: Eq + Hash,
    R: Clone,
{
    /// Creates an empty cache with an optional diagnostic name.
    pub fn new(name: Option<String>) -> Self {
        Self::with_capacity(name, 0)
    }

    /// Creates an empty named cache.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Some(name.into()))
    }

    /// Creates an empty cache with room for `capacity` entries.
    ///
    /// `capacity` is an allocation hint, not a bound: the cache keeps growing.
    pub fn with_capacity(name: Option<String>, capacity: usize) -> Self {
        Self {
            name,
            entries: Mutex::new(FxHashMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
            #[cfg(feature = "metrics")]
            metrics: MemoMetrics::default(),
        }
    }

    /// Returns the stored result for `key`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> R
    where
        F: FnOnce() -> R,
    {
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }
        let value = compute();
        self.store(key, value)
    }

    /// Like [`get_or_compute`](Self::get_or_compute) for fallible computations.
    ///
    /// An `Err` is returned to the caller and nothing is stored, so a later
    /// call with the same key runs the computation again.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::memo::KeyedCache;
    ///
    /// let cache: KeyedCache<&str, u32> = KeyedCache::new(None);
    /// let parsed: Result<u32, _> = cache.try_get_or_compute("x1", || "x1".parse::<u32>());
    /// assert!(parsed.is_err());
    /// assert!(cache.is_empty());
    /// ```
    pub fn try_get_or_compute<E, F>(&self, key: K, compute: F) -> Result<R, E>
    where
        F: FnOnce() -> Result<R, E>,
    {
        if let Some(hit) = self.lookup(&key) {
            return Ok(hit);
        }
        match compute() {
            Ok(value) => Ok(self.store(key, value)),
            Err(err) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_failed_compute();
                Err(err)
            },
        }
    }

    /// Returns a clone of the stored result without computing anything.
    ///
    /// Does not touch hit/miss counters.
    pub fn peek(&self, key: &K) -> Option<R> {
        self.entries.lock().get(key).cloned()
    }

    /// Returns `true` if a result is stored for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.lock().contains_key(key)
    }

    fn lookup(&self, key: &K) -> Option<R> {
        #[cfg(feature = "metrics")]
        self.metrics.record_get_call();
        let entries = self.entries.lock();
        match entries.get(key) {
            Some(value) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_hit();
                Some(value.clone())
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_miss();
                None
            },
        }
    }

    fn store(&self, key: K, value: R) -> R {
        let mut entries = self.entries.lock();
        match entries.entry(key) {
            Entry::Occupied(existing) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_race();
                existing.get().clone()
            },
            Entry::Vacant(slot) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert();
                slot.insert(value.clone());
                value
            },
        }
    }
}

impl<K, R> KeyedCache<K, R> {
    /// Returns the diagnostic name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the number of stored results.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, R> MemoStatsSource for KeyedCache<K, R> {
    fn cache_name(&self) -> Option<&str> {
        self.name()
    }

    fn cache_size(&self) -> usize {
        self.len()
    }

    #[cfg(feature = "metrics")]
    fn metrics_snapshot(&self) -> MemoMetricsSnapshot {
        self.metrics.snapshot(self.len())
    }
}

#[cfg(feature = "metrics")]
impl<K, R> MetricsSnapshotProvider<MemoMetricsSnapshot> for KeyedCache<K, R> {
    fn snapshot(&self) -> MemoMetricsSnapshot {
        MemoStatsSource::metrics_snapshot(self)
    }
}

#[cfg(feature = "metrics")]
impl<K, R> crate::metrics::traits::MetricsReset for KeyedCache<K, R> {
    fn reset_metrics(&self) {
        crate::metrics::traits::MetricsReset::reset_metrics(&self.metrics);
    }
}

impl<K, R> fmt::Debug for KeyedCache<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCache")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn computes_once_per_key() {
        let cache: KeyedCache<u32, String> = KeyedCache::named("strings");
        let calls = Cell::new(0);

        for _ in 0..3 {
            let value = cache.get_or_compute(7, || {
                calls.set(calls.get() + 1);
                "seven".to_string()
            });
            assert_eq!(value, "seven");
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_keys_get_distinct_entries() {
        let cache: KeyedCache<u32, u32> = KeyedCache::new(None);
        for n in 0..10 {
            assert_eq!(cache.get_or_compute(n, || n * n), n * n);
        }
        assert_eq!(cache.len(), 10);
        assert_eq!(cache.peek(&3), Some(9));
        assert_eq!(cache.peek(&11), None);
        assert!(cache.contains(&9));
    }

    #[test]
    fn failure_is_not_cached() {
        let cache: KeyedCache<u8, u8> = KeyedCache::new(None);
        let calls = Cell::new(0);

        let attempt = |fail: bool| {
            cache.try_get_or_compute(1, || {
                calls.set(calls.get() + 1);
                if fail { Err("boom") } else { Ok(42) }
            })
        };

        assert_eq!(attempt(true), Err("boom"));
        assert!(cache.is_empty());
        assert_eq!(attempt(true), Err("boom"));
        assert_eq!(attempt(false), Ok(42));
        assert_eq!(attempt(true), Ok(42));

        assert_eq!(calls.get(), 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn reentrant_compute_does_not_deadlock() {
        let cache: KeyedCache<u64, u64> = KeyedCache::named("reentrant");

        fn fib(cache: &KeyedCache<u64, u64>, n: u64) -> u64 {
            cache.get_or_compute(n, || {
                if n < 2 {
                    n
                } else {
                    fib(cache, n - 1) + fib(cache, n - 2)
                }
            })
        }

        assert_eq!(fib(&cache, 80), 23_416_728_348_467_685);
        assert_eq!(cache.len(), 81);
    }

    #[test]
    fn stats_report_name_and_size_without_mutation() {
        let cache: KeyedCache<u8, u8> = KeyedCache::named("bytes");
        cache.get_or_compute(1, || 1);
        cache.get_or_compute(2, || 2);

        let stats = cache.stats();
        assert_eq!(stats.name.as_deref(), Some("bytes"));
        assert_eq!(stats.size, 2);
        assert_eq!(cache.stats(), stats);
    }

    #[test]
    fn debug_output_shows_name_and_len() {
        let cache: KeyedCache<u8, u8> = KeyedCache::named("dbg");
        cache.get_or_compute(0, || 0);
        let dbg = format!("{:?}", cache);
        assert!(dbg.contains("dbg"));
        assert!(dbg.contains("len: 1"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_hits_misses_and_failures() {
        let cache: KeyedCache<u8, u8> = KeyedCache::new(None);
        cache.get_or_compute(1, || 1);
        cache.get_or_compute(1, || 1);
        let _ = cache.try_get_or_compute(2, || Err::<u8, _>(()));

        let snap = cache.metrics_snapshot();
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.hits, 1);
        assert_eq!(snap.misses, 2);
        assert_eq!(snap.inserts, 1);
        assert_eq!(snap.failed_computes, 1);
        assert_eq!(snap.cache_len, 1);
    }
}
