//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting, and export are split into small traits so the
//! memo and cycle engines only ever write counters, while monitoring code
//! only reads them.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     MemoMetricsRecorder     │   written by KeyedCache on every lookup
//!   │  get_call/hit/miss/insert   │   (&self, atomics; the cache is shared)
//!   │  insert_race/failed_compute │
//!   └──────────────┬──────────────┘
//!                  │
//!                  ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Cycle acceleration has no recorder: every run is a fresh value, so its
//! counters live on the [`Acceleration`](crate::cycle::Acceleration) outcome
//! and are snapshotted from there.

/// Counters for a keyed memo cache.
///
/// Methods take `&self`: a cache is reachable through shared references
/// (recursive calls, the registry) while it records.
pub trait MemoMetricsRecorder {
    fn record_get_call(&self);
    fn record_hit(&self);
    fn record_miss(&self);
    fn record_insert(&self);
    /// A computed result was discarded because another writer stored the key first.
    fn record_insert_race(&self);
    /// The wrapped computation returned an error; nothing was stored.
    fn record_failed_compute(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
