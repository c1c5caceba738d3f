#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoMetricsSnapshot {
    pub get_calls: u64,
    pub hits: u64,
    pub misses: u64,

    pub inserts: u64,
    pub insert_races: u64, // computed but discarded, another writer stored first
    pub failed_computes: u64,

    // gauge captured at snapshot time
    pub cache_len: usize,
}

impl MemoMetricsSnapshot {
    /// Fraction of lookups answered from the cache, `0.0` before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.hits as f64 / self.get_calls as f64
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AccelerationMetricsSnapshot {
    pub target_step: u64,
    pub transitions_applied: u64,
    pub recorded_states: u64,

    pub cycle_found: bool,
    pub first_occurrence: u64,
    pub period: u64,
}

impl AccelerationMetricsSnapshot {
    /// Transitions avoided relative to direct simulation.
    pub fn transitions_skipped(&self) -> u64 {
        self.target_step.saturating_sub(self.transitions_applied)
    }
}
