//! Transition implementations for the cycle accelerator.
//!
//! - [`FnTransition`]: one operation applied every step; phase is `()`.
//! - [`RoundRobin`]: several operations applied in rotation; phase is the
//!   index of the pending operation.
//!
//! ```text
//!   RoundRobin [north, west, south, east]
//!
//!   step:    0      1      2      3      4      5     ...
//!   phase:   0      1      2      3      0      1
//!   op:    north   west  south   east  north   west
//! ```
//!
//! With a rotation, the same state can legitimately appear before `north`
//! and again before `south` without the sequence repeating. Keying the
//! detector on `(phase, state)` rules that false positive out.

use std::fmt;

use crate::traits::Transition;

/// Single-operation transition built from a closure.
///
/// # Example
///
/// ```
/// use memokit::cycle::FnTransition;
/// use memokit::traits::Transition;
///
/// let mut inc = FnTransition::new(|n: &u32| n + 1);
/// assert_eq!(inc.apply(&41, 0), 42);
/// ```
#[derive(Clone)]
pub struct FnTransition<F> {
    step: F,
}

impl<F> FnTransition<F> {
    pub fn new(step: F) -> Self {
        Self { step }
    }
}

impl<S, F> Transition<S> for FnTransition<F>
where
    F: FnMut(&S) -> S,
{
    type Phase = ();

    #[inline]
    fn pending_phase(&self, _step: u64) {}

    #[inline]
    fn apply(&mut self, state: &S, _step: u64) -> S {
        (self.step)(state)
    }
}

impl<F> fmt::Debug for FnTransition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransition").finish_non_exhaustive()
    }
}

type PhaseFn<'a, S> = Box<dyn FnMut(&S) -> S + 'a>;

/// Rotation over several sub-operations, one per step.
///
/// Constructed with its first operation so it is never empty.
///
/// # Example
///
/// ```
/// use memokit::cycle::RoundRobin;
/// use memokit::traits::Transition;
///
/// let mut rotation = RoundRobin::new(|n: &i32| n + 10).then(|n: &i32| n * 2);
/// assert_eq!(rotation.len(), 2);
/// assert_eq!(rotation.pending_phase(3), 1);
///
/// let first = rotation.apply(&1, 0);
/// assert_eq!(rotation.apply(&first, 1), 22);
/// ```
pub struct RoundRobin<'a, S> {
    phases: Vec<PhaseFn<'a, S>>,
}

impl<'a, S> RoundRobin<'a, S> {
    /// Starts a rotation with `first` as phase 0.
    pub fn new(first: impl FnMut(&S) -> S + 'a) -> Self {
        Self {
            phases: vec![Box::new(first)],
        }
    }

    /// Appends the next phase.
    pub fn then(mut self, next: impl FnMut(&S) -> S + 'a) -> Self {
        self.phases.push(Box::new(next));
        self
    }

    /// Number of phases in one full rotation.
    #[inline]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always `false`; a rotation has at least one phase.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[inline]
    fn phase_index(&self, step: u64) -> usize {
        // len() >= 1, and the remainder fits in usize because it is < len().
        (step % self.phases.len() as u64) as usize
    }
}

impl<S> Transition<S> for RoundRobin<'_, S> {
    type Phase = usize;

    #[inline]
    fn pending_phase(&self, step: u64) -> usize {
        self.phase_index(step)
    }

    #[inline]
    fn apply(&mut self, state: &S, step: u64) -> S {
        let index = self.phase_index(step);
        (self.phases[index])(state)
    }
}

impl<S> fmt::Debug for RoundRobin<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundRobin")
            .field("phases", &self.phases.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_transition_ignores_step() {
        let mut t = FnTransition::new(|s: &u8| s.wrapping_mul(3));
        assert_eq!(t.apply(&5, 0), 15);
        assert_eq!(t.apply(&5, 1_000), 15);
        assert_eq!(t.apply(&100, 7), 44);
    }

    #[test]
    fn round_robin_rotates_phases_in_order() {
        let mut rotation = RoundRobin::new(|s: &String| format!("{s}N"))
            .then(|s: &String| format!("{s}W"))
            .then(|s: &String| format!("{s}S"))
            .then(|s: &String| format!("{s}E"));

        let mut state = String::new();
        for step in 0..6 {
            assert_eq!(rotation.pending_phase(step), (step % 4) as usize);
            state = rotation.apply(&state, step);
        }
        assert_eq!(state, "NWSENW");
        assert!(!rotation.is_empty());
    }

    #[test]
    fn round_robin_phases_may_borrow_local_state() {
        let offsets = [1, 100];
        let mut rotation =
            RoundRobin::new(|n: &i32| n + offsets[0]).then(|n: &i32| n + offsets[1]);
        assert_eq!(rotation.apply(&0, 1), 100);
        assert_eq!(rotation.apply(&0, 2), 1);
    }
}
