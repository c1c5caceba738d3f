use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::MemoMetricsSnapshot;
use crate::metrics::traits::{MemoMetricsRecorder, MetricsReset};

#[derive(Debug, Default)]
pub struct MemoMetrics {
    get_calls: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    insert_races: AtomicU64,
    failed_computes: AtomicU64,
}

impl MemoMetrics {
    pub fn snapshot(&self, cache_len: usize) -> MemoMetricsSnapshot {
        MemoMetricsSnapshot {
            get_calls: self.get_calls.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            insert_races: self.insert_races.load(Ordering::Relaxed),
            failed_computes: self.failed_computes.load(Ordering::Relaxed),
            cache_len,
        }
    }
}

impl MemoMetricsRecorder for MemoMetrics {
    fn record_get_call(&self) {
        self.get_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    fn record_insert_race(&self) {
        self.insert_races.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failed_compute(&self) {
        self.failed_computes.fetch_add(1, Ordering::Relaxed);
    }
}

impl MetricsReset for MemoMetrics {
    fn reset_metrics(&self) {
        self.get_calls.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
        self.insert_races.store(0, Ordering::Relaxed);
        self.failed_computes.store(0, Ordering::Relaxed);
    }
}
