//! Recorded state history of one acceleration request.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                      SimulationRun<K, S> Layout                             │
//! │                                                                             │
//! │   history: Vec<S>                    first_seen: FxHashMap<K, u64>          │
//! │   ───────────────                    ─────────────────────────────          │
//! │   index = step                       key = (phase, state key)               │
//! │                                      value = first step it was seen         │
//! │                                                                             │
//! │   step:     0     1     2     3            (N0,a) → 0                       │
//! │           ┌─────┬─────┬─────┬─────┐        (W1,b) → 1                       │
//! │   history:│  a  │  b  │  c  │  d  │        (S2,c) → 2                       │
//! │           └─────┴─────┴─────┴─────┘        (E3,d) → 3                       │
//! │                                                                             │
//! │   observe((N0,a), a) at step 4  →  CycleDescriptor { first: 0, end: 4 }     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every observed step is recorded; the index holds first occurrences only.
//! A run is created per request and dropped once the answer is extracted.

use std::collections::hash_map::Entry;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::cycle::CycleDescriptor;
use crate::error::InvariantError;

/// State history plus first-occurrence index for cycle detection.
///
/// # Example
///
/// ```
/// use memokit::cycle::SimulationRun;
///
/// let mut run = SimulationRun::new();
/// assert!(run.observe('a', "a").is_none());
/// assert!(run.observe('b', "b").is_none());
///
/// let cycle = run.observe('a', "a").expect("a repeats");
/// assert_eq!(cycle.first_occurrence(), 0);
/// assert_eq!(cycle.period(), 2);
/// assert_eq!(run.state_at(1), Some(&"b"));
/// ```
#[derive(Debug, Clone)]
pub struct SimulationRun<K, S> {
    history: Vec<S>,
    first_seen: FxHashMap<K, u64>,
}

impl<K, S> SimulationRun<K, S>
where
    K: Eq + Hash,
{
    /// Creates an empty run.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty run with room for `capacity` steps.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Vec::with_capacity(capacity),
            first_seen: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Observes the state at the next step, `self.len()`.
    ///
    /// Returns the cycle if `key` was seen before; the repeated state is not
    /// recorded in that case. Otherwise records `state` and returns `None`.
    pub fn observe(&mut self, key: K, state: S) -> Option<CycleDescriptor> {
        let step = self.len();
        match self.first_seen.entry(key) {
            Entry::Occupied(seen) => Some(CycleDescriptor::new(*seen.get(), step)),
            Entry::Vacant(slot) => {
                slot.insert(step);
                self.history.push(state);
                None
            },
        }
    }

    /// Returns the first step at which `key` was observed.
    pub fn first_seen_at(&self, key: &K) -> Option<u64> {
        self.first_seen.get(key).copied()
    }

    /// Consumes the run and returns the state `cycle` maps `target` to.
    ///
    /// # Panics
    ///
    /// Panics if the equivalent step was never recorded, which means `cycle`
    /// did not come from this run.
    pub fn into_resolved(self, cycle: &CycleDescriptor, target: u64) -> S {
        let step = cycle.equivalent_step(target);
        match self.into_state(step) {
            Some(state) => state,
            None => panic!(
                "equivalent step {step} for target {target} is outside the recorded history"
            ),
        }
    }

    /// Validates that the history and the index describe the same steps.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.first_seen.len() != self.history.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but history holds {} states",
                self.first_seen.len(),
                self.history.len()
            )));
        }
        let mut steps: Vec<u64> = self.first_seen.values().copied().collect();
        steps.sort_unstable();
        for (expected, &step) in steps.iter().enumerate() {
            if step != expected as u64 {
                return Err(InvariantError::new(format!(
                    "index is missing step {expected} (found {step})"
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("{}", err);
        }
    }
}

impl<K, S> SimulationRun<K, S> {
    /// Number of recorded steps.
    #[inline]
    pub fn len(&self) -> u64 {
        self.history.len() as u64
    }

    /// Returns `true` if nothing has been observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns the state recorded at `step`.
    pub fn state_at(&self, step: u64) -> Option<&S> {
        usize::try_from(step).ok().and_then(|i| self.history.get(i))
    }

    /// Consumes the run and returns the state recorded at `step`.
    pub fn into_state(mut self, step: u64) -> Option<S> {
        let index = usize::try_from(step).ok()?;
        if index < self.history.len() {
            Some(self.history.swap_remove(index))
        } else {
            None
        }
    }
}

impl<K, S> Default for SimulationRun<K, S>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_every_new_state_in_order() {
        let mut run = SimulationRun::new();
        for (step, state) in ["a", "b", "c"].into_iter().enumerate() {
            assert_eq!(run.len(), step as u64);
            assert!(run.observe(state, state).is_none());
        }
        assert_eq!(run.len(), 3);
        assert_eq!(run.state_at(0), Some(&"a"));
        assert_eq!(run.state_at(2), Some(&"c"));
        assert_eq!(run.state_at(3), None);
        run.debug_validate_invariants();
    }

    #[test]
    fn repeat_reports_first_occurrence_and_is_not_recorded() {
        let mut run = SimulationRun::new();
        run.observe(1, 'x');
        run.observe(2, 'y');
        run.observe(3, 'z');

        let cycle = run.observe(2, 'y').expect("key 2 repeats");
        assert_eq!(cycle.first_occurrence(), 1);
        assert_eq!(cycle.loop_end(), 3);
        assert_eq!(run.len(), 3);
        assert_eq!(run.first_seen_at(&2), Some(1));
        run.debug_validate_invariants();
    }

    #[test]
    fn same_state_under_different_key_is_not_a_cycle() {
        let mut run = SimulationRun::new();
        assert!(run.observe((0, 'a'), 'a').is_none());
        assert!(run.observe((1, 'a'), 'a').is_none());
        assert!(run.observe((0, 'a'), 'a').is_some());
    }

    #[test]
    fn into_resolved_folds_large_targets() {
        let mut run = SimulationRun::new();
        for n in 0..5u8 {
            run.observe(n, n);
        }
        let cycle = run.observe(0, 0).expect("wraps to 0");
        assert_eq!(run.clone().into_resolved(&cycle, 3), 3);
        assert_eq!(run.into_resolved(&cycle, 1_000_003), 3);
    }

    #[test]
    fn into_resolved_at_loop_end_returns_repeated_state() {
        let mut run = SimulationRun::new();
        run.observe('a', "a");
        run.observe('b', "b");
        let cycle = run.observe('a', "a").expect("a repeats");
        assert_eq!(cycle.loop_end(), 2);
        assert_eq!(run.clone().into_resolved(&cycle, cycle.loop_end()), "a");
        assert_eq!(run.clone().into_resolved(&cycle, 1), "b");
        assert_eq!(run.into_resolved(&cycle, 3), "b");
    }

    #[test]
    fn into_state_out_of_range_is_none() {
        let mut run: SimulationRun<u8, u8> = SimulationRun::new();
        run.observe(0, 0);
        assert_eq!(run.clone().into_state(0), Some(0));
        assert_eq!(run.into_state(1), None);
    }

    #[test]
    fn check_invariants_detects_divergence() {
        let mut run: SimulationRun<u8, u8> = SimulationRun::new();
        run.observe(0, 0);
        run.history.push(9);
        assert!(run.check_invariants().is_err());
    }

    #[test]
    #[should_panic(expected = "outside the recorded history")]
    fn foreign_cycle_is_a_defect() {
        let mut run: SimulationRun<u8, u8> = SimulationRun::new();
        run.observe(0, 0);
        run.into_resolved(&CycleDescriptor::new(3, 9), 5);
    }
}
