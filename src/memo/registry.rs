//! Process-wide registry of weak handles to live memo caches.
//!
//! The registry exists for diagnostics only. It holds [`Weak`] handles, so
//! registering a cache never extends its lifetime: once the last
//! [`Memoized`](crate::memo::Memoized) owning a cache is dropped, the handle
//! lapses and is pruned the next time the registry is touched.
//!
//! ```text
//!   Memoized ──owns──▶ Arc<KeyedCache> ◀──weak── CacheRegistry.handles
//!
//!   drop(Memoized)  ⇒  Arc count 0  ⇒  Weak::upgrade() == None  ⇒  pruned
//! ```
//!
//! Removing the registry from a program changes what can be observed, never
//! what is computed.

use std::sync::{Arc, Weak};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::memo::MemoStats;
use crate::traits::MemoStatsSource;

type Handle = Weak<dyn MemoStatsSource + Send + Sync>;

static GLOBAL: Lazy<CacheRegistry> = Lazy::new(CacheRegistry::new);

/// Registry of non-owning handles to memo caches.
///
/// Safe under concurrent [`register`](Self::register) and
/// [`all_stats`](Self::all_stats) calls; the handle list sits behind a single
/// mutex. Its size is bounded by the number of live caches plus the handles
/// that lapsed since the last call.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use memokit::memo::{CacheRegistry, KeyedCache};
///
/// let registry = CacheRegistry::new();
/// let cache = Arc::new(KeyedCache::<u8, u8>::named("bytes"));
/// registry.register(&cache);
/// assert_eq!(registry.all_stats().len(), 1);
///
/// drop(cache);
/// assert!(registry.all_stats().is_empty());
/// ```
#[derive(Default)]
pub struct CacheRegistry {
    handles: Mutex<Vec<Handle>>,
}

impl CacheRegistry {
    /// Creates an empty registry, independent of [`global`](Self::global).
    pub fn new() -> Self {
        Self {
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Returns the process-wide registry used by the `memoize*` functions.
    pub fn global() -> &'static CacheRegistry {
        &GLOBAL
    }

    /// Records a non-owning handle to `cache`.
    pub fn register<C>(&self, cache: &Arc<C>)
    where
        C: MemoStatsSource + Send + Sync + 'static,
    {
        let weak: Weak<C> = Arc::downgrade(cache);
        let handle: Handle = weak;
        let mut handles = self.handles.lock();
        Self::prune(&mut handles);
        handles.push(handle);
    }

    /// Returns the stats of every cache still reachable elsewhere.
    ///
    /// Lapsed handles are pruned as a side effect. Order is unspecified.
    pub fn all_stats(&self) -> Vec<MemoStats> {
        self.live()
            .iter()
            .map(|cache| cache.stats())
            .collect()
    }

    /// Returns stats paired with access counters for every live cache.
    #[cfg(feature = "metrics")]
    pub fn all_metrics(&self) -> Vec<(MemoStats, crate::metrics::snapshot::MemoMetricsSnapshot)> {
        self.live()
            .iter()
            .map(|cache| (cache.stats(), cache.metrics_snapshot()))
            .collect()
    }

    /// Returns the number of live caches, pruning lapsed handles.
    pub fn live_count(&self) -> usize {
        let mut handles = self.handles.lock();
        Self::prune(&mut handles);
        handles.len()
    }

    /// Emits one `info` event per live cache.
    pub fn log_stats(&self) {
        for stats in self.all_stats() {
            tracing::info!(cache = stats.display_name(), entries = stats.size, "memo cache");
        }
    }

    // Upgrades under the lock, but queries caches only after releasing it:
    // a cache's own lock must never nest inside the registry's.
    fn live(&self) -> Vec<Arc<dyn MemoStatsSource + Send + Sync>> {
        let mut handles = self.handles.lock();
        Self::prune(&mut handles);
        handles.iter().filter_map(Weak::upgrade).collect()
    }

    fn prune(handles: &mut Vec<Handle>) {
        let before = handles.len();
        handles.retain(|handle| handle.strong_count() > 0);
        let pruned = before - handles.len();
        if pruned > 0 {
            tracing::trace!(pruned, live = handles.len(), "pruned lapsed memo caches");
        }
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("handles", &self.handles.lock().len())
            .finish()
    }
}
