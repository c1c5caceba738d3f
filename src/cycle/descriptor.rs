//! The repeating segment found by a simulation run.

/// A detected cycle: the state at `loop_end` equals the state first seen at
/// `first_occurrence`, so the sequence repeats with period
/// `loop_end - first_occurrence` from `first_occurrence` on.
///
/// ```text
///   step:   0   1   2   3   4   5   6   7   ...
///   state:  a   b   c   d   e   c   d   e   ...
///                   ▲           ▲
///        first_occurrence=2  loop_end=5      period = 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleDescriptor {
    first_occurrence: u64,
    loop_end: u64,
}

impl CycleDescriptor {
    /// Creates a descriptor.
    ///
    /// # Panics
    ///
    /// Panics if `first_occurrence >= loop_end`. A zero or negative period
    /// can only come from a defect in the detector, never from caller input.
    pub fn new(first_occurrence: u64, loop_end: u64) -> Self {
        assert!(
            first_occurrence < loop_end,
            "cycle must have a positive period (first_occurrence={first_occurrence}, loop_end={loop_end})"
        );
        Self {
            first_occurrence,
            loop_end,
        }
    }

    /// Step at which the repeating state was first observed.
    #[inline]
    pub fn first_occurrence(&self) -> u64 {
        self.first_occurrence
    }

    /// Step at which the repetition was detected.
    #[inline]
    pub fn loop_end(&self) -> u64 {
        self.loop_end
    }

    /// Length of the repeating segment, always `> 0`.
    #[inline]
    pub fn period(&self) -> u64 {
        self.loop_end - self.first_occurrence
    }

    /// Maps `target` to the earliest recorded step holding the same state.
    ///
    /// Targets before `loop_end` map to themselves; `loop_end` and later
    /// targets fold back into `first_occurrence..loop_end`, so the result is
    /// always a step that was recorded before the repeat was observed.
    ///
    /// ```
    /// use memokit::cycle::CycleDescriptor;
    ///
    /// let cycle = CycleDescriptor::new(2, 5);
    /// assert_eq!(cycle.equivalent_step(4), 4);
    /// assert_eq!(cycle.equivalent_step(5), 2);
    /// assert_eq!(cycle.equivalent_step(6), 3);
    /// assert_eq!(cycle.equivalent_step(1_000_000_000), 2 + (1_000_000_000 - 5) % 3);
    /// ```
    pub fn equivalent_step(&self, target: u64) -> u64 {
        if target < self.loop_end {
            target
        } else {
            self.first_occurrence + (target - self.loop_end) % self.period()
        }
    }
}
