//! Cycle-accelerated simulation.
//!
//! Resolves the state after `target` transitions without applying them all,
//! provided the state sequence becomes periodic before `target`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          CycleAccelerator::run                              │
//! │                                                                             │
//! │   step = 0, state = initial                                                 │
//! │        │                                                                    │
//! │        ▼                                                                    │
//! │   step == target? ──yes──▶ Acceleration { state, cycle: None }              │
//! │        │ no                                                                 │
//! │        ▼                                                                    │
//! │   probe limit hit? ──yes──▶ simulate directly to target (nothing recorded)  │
//! │        │ no                                                                 │
//! │        ▼                                                                    │
//! │   run.observe((phase, key(state)), state)                                   │
//! │        │                                                                    │
//! │        ├── Some(cycle) ──▶ Acceleration { history[cycle.equivalent_step] }  │
//! │        │                                                                    │
//! │        └── None ──▶ state = transition.apply(state, step); step += 1 ──┐    │
//! │                                                                        │    │
//! │        ▲───────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use memokit::cycle::accelerate;
//!
//! // (s + 1) mod 5 repeats after five steps.
//! let state = accelerate(0u32, 1_000_000, |s: &u32| (s + 1) % 5, |s: &u32| *s);
//! assert_eq!(state, 0);
//! ```

use std::hash::Hash;

use crate::cycle::{CycleDescriptor, FnTransition, RoundRobin, SimulationRun};
use crate::error::ConfigError;
use crate::traits::Transition;

/// Settings for [`CycleAccelerator`].
///
/// # Example
///
/// ```
/// use memokit::cycle::AcceleratorConfig;
///
/// let config = AcceleratorConfig::default().probe_limit(10_000);
/// assert_eq!(config.limit(), Some(10_000));
/// assert!(config.validate().is_ok());
/// assert!(AcceleratorConfig::default().probe_limit(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceleratorConfig {
    probe_limit: Option<u64>,
}

impl AcceleratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops recording after `limit` states without a recurrence and
    /// simulates the rest directly. Bounds the history to `limit` entries.
    pub fn probe_limit(mut self, limit: u64) -> Self {
        self.probe_limit = Some(limit);
        self
    }

    /// Configured probe limit; `None` records until `target`.
    pub fn limit(&self) -> Option<u64> {
        self.probe_limit
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_limit == Some(0) {
            return Err(ConfigError::new(
                "probe_limit must be at least 1; leave it unset to record every step",
            ));
        }
        Ok(())
    }
}

/// Outcome of [`CycleAccelerator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceleration<S> {
    state: S,
    cycle: Option<CycleDescriptor>,
    target: u64,
    transitions_applied: u64,
    recorded_states: u64,
}

impl<S> Acceleration<S> {
    /// State after `target` transitions.
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    /// The cycle used to resolve the target, if one was found in time.
    pub fn cycle(&self) -> Option<&CycleDescriptor> {
        self.cycle.as_ref()
    }

    /// Returns `true` if the answer came from the history rather than from
    /// simulating every step.
    pub fn is_accelerated(&self) -> bool {
        self.cycle.is_some()
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Number of times the transition was actually applied.
    pub fn transitions_applied(&self) -> u64 {
        self.transitions_applied
    }

    /// Peak history length.
    pub fn recorded_states(&self) -> u64 {
        self.recorded_states
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> crate::metrics::snapshot::AccelerationMetricsSnapshot {
        crate::metrics::snapshot::AccelerationMetricsSnapshot {
            target_step: self.target,
            transitions_applied: self.transitions_applied,
            recorded_states: self.recorded_states,
            cycle_found: self.cycle.is_some(),
            first_occurrence: self.cycle.map_or(0, |c| c.first_occurrence()),
            period: self.cycle.map_or(0, |c| c.period()),
        }
    }
}

/// Simulates a [`Transition`] and short-circuits once the state sequence
/// repeats.
///
/// `state_key` projects a state to the value cycle detection compares. It
/// must be injective on the states that actually occur: two distinct states
/// with equal keys are reported as a cycle.
///
/// The transition's pending phase is always part of the key, so a
/// [`RoundRobin`] never reports a cycle that ends mid-rotation.
///
/// # Example
///
/// ```
/// use memokit::cycle::{CycleAccelerator, FnTransition};
///
/// let mut accelerator = CycleAccelerator::new(
///     FnTransition::new(|s: &u32| (s + 1) % 5),
///     |s: &u32| *s,
/// );
/// let outcome = accelerator.run(0, 1_000_000);
///
/// assert_eq!(*outcome.state(), 0);
/// let cycle = outcome.cycle().expect("repeats");
/// assert_eq!(cycle.first_occurrence(), 0);
/// assert_eq!(cycle.period(), 5);
/// assert_eq!(outcome.transitions_applied(), 5);
/// ```
pub struct CycleAccelerator<T, P> {
    transition: T,
    state_key: P,
    config: AcceleratorConfig,
}

impl<T, P> CycleAccelerator<T, P> {
    /// Creates an accelerator that records until `target` or a recurrence.
    pub fn new(transition: T, state_key: P) -> Self {
        Self {
            transition,
            state_key,
            config: AcceleratorConfig::default(),
        }
    }

    /// Creates an accelerator with explicit settings.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid; see [`AcceleratorConfig::validate`].
    pub fn with_config(transition: T, state_key: P, config: AcceleratorConfig) -> Self {
        match Self::try_with_config(transition, state_key, config) {
            Ok(accelerator) => accelerator,
            Err(err) => panic!("invalid accelerator config: {err}"),
        }
    }

    /// Fallible counterpart of [`with_config`](Self::with_config).
    pub fn try_with_config(
        transition: T,
        state_key: P,
        config: AcceleratorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transition,
            state_key,
            config,
        })
    }

    pub fn config(&self) -> &AcceleratorConfig {
        &self.config
    }

    /// Resolves the state after `target` transitions from `initial`.
    ///
    /// Each call starts a fresh history; nothing carries over between runs.
    pub fn run<S, K>(&mut self, initial: S, target: u64) -> Acceleration<S>
    where
        T: Transition<S>,
        P: FnMut(&S) -> K,
        K: Eq + Hash,
        S: Clone,
    {
        let mut run: SimulationRun<(<T as Transition<S>>::Phase, K), S> = SimulationRun::new();
        let mut state = initial;
        let mut step = 0u64;

        while step < target {
            if self.config.probe_limit.is_some_and(|limit| run.len() >= limit) {
                tracing::trace!(
                    recorded = run.len(),
                    step,
                    target,
                    "probe limit exhausted, simulating directly"
                );
                let recorded_states = run.len();
                drop(run);
                let state = self.simulate(state, step, target);
                return Acceleration {
                    state,
                    cycle: None,
                    target,
                    transitions_applied: target,
                    recorded_states,
                };
            }

            let key = (self.transition.pending_phase(step), (self.state_key)(&state));
            if let Some(cycle) = run.observe(key, state.clone()) {
                tracing::debug!(
                    first_occurrence = cycle.first_occurrence(),
                    loop_end = cycle.loop_end(),
                    period = cycle.period(),
                    target,
                    "cycle detected"
                );
                #[cfg(debug_assertions)]
                run.debug_validate_invariants();
                let recorded_states = run.len();
                return Acceleration {
                    state: run.into_resolved(&cycle, target),
                    cycle: Some(cycle),
                    target,
                    transitions_applied: step,
                    recorded_states,
                };
            }

            state = self.transition.apply(&state, step);
            step += 1;
        }

        Acceleration {
            state,
            cycle: None,
            target,
            transitions_applied: target,
            recorded_states: run.len(),
        }
    }

    fn simulate<S>(&mut self, mut state: S, from: u64, target: u64) -> S
    where
        T: Transition<S>,
    {
        for step in from..target {
            state = self.transition.apply(&state, step);
        }
        state
    }
}

impl<T, P> std::fmt::Debug for CycleAccelerator<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleAccelerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Returns the state after `target` applications of `step` to `initial`.
///
/// Falls back to plain simulation when no state repeats before `target`.
pub fn accelerate<S, K, F, P>(initial: S, target: u64, step: F, state_key: P) -> S
where
    S: Clone,
    K: Eq + Hash,
    F: FnMut(&S) -> S,
    P: FnMut(&S) -> K,
{
    CycleAccelerator::new(FnTransition::new(step), state_key)
        .run(initial, target)
        .into_state()
}

/// Like [`accelerate`], for a transition that rotates through `phases`.
///
/// `target` counts single sub-operations, not full rotations.
pub fn accelerate_phased<S, K, P>(
    initial: S,
    target: u64,
    phases: RoundRobin<'_, S>,
    state_key: P,
) -> S
where
    S: Clone,
    K: Eq + Hash,
    P: FnMut(&S) -> K,
{
    CycleAccelerator::new(phases, state_key)
        .run(initial, target)
        .into_state()
}
