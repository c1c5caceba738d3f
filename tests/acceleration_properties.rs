// ==============================================
// CYCLE ACCELERATION PROPERTY TESTS (integration)
// ==============================================
//
// Every accelerated answer must equal the state reached by applying the
// transition `target` times directly.

use memokit::cycle::{
    AcceleratorConfig, CycleAccelerator, FnTransition, RoundRobin, Transition, accelerate,
    accelerate_phased,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn direct<S: Clone>(initial: S, target: u64, mut step: impl FnMut(&S) -> S) -> S {
    let mut state = initial;
    for _ in 0..target {
        state = step(&state);
    }
    state
}

// ==============================================
// Fixed sequences
// ==============================================

#[test]
fn three_cycle_matches_direct_simulation_for_small_targets() {
    let next = |s: &char| match s {
        'A' => 'B',
        'B' => 'C',
        _ => 'A',
    };
    for target in 0..=20 {
        let expected = ['A', 'B', 'C'][(target % 3) as usize];
        assert_eq!(accelerate('A', target, next, |s| *s), expected, "N = {target}");
        assert_eq!(direct('A', target, next), expected);
    }
}

#[test]
fn increment_mod_five_for_a_million_steps() {
    let mut accelerator =
        CycleAccelerator::new(FnTransition::new(|s: &u32| (s + 1) % 5), |s: &u32| *s);
    let outcome = accelerator.run(0, 1_000_000);

    assert_eq!(*outcome.state(), 0);
    let cycle = outcome.cycle().expect("cycle found");
    assert_eq!(cycle.first_occurrence(), 0);
    assert_eq!(cycle.period(), 5);
}

#[test]
fn strictly_increasing_sequence_falls_back_to_direct_simulation() {
    let outcome = CycleAccelerator::new(FnTransition::new(|s: &u64| s + 3), |s: &u64| *s)
        .run(1, 10_000);
    assert_eq!(*outcome.state(), 30_001);
    assert!(outcome.cycle().is_none());
    assert_eq!(outcome.transitions_applied(), 10_000);
}

#[test]
fn repeated_runs_are_idempotent() {
    let step = |s: &u64| (s * s + 1) % 1_009;
    let first = accelerate(2, 987_654_321, step, |s| *s);
    for _ in 0..3 {
        assert_eq!(accelerate(2, 987_654_321, step, |s| *s), first);
    }
}

#[test]
fn coarse_state_key_projects_away_irrelevant_fields() {
    // The counter field changes every step but does not influence the
    // future; keying on the position alone still finds the cycle.
    #[derive(Clone)]
    struct Walker {
        position: u8,
        steps_taken: u64,
    }
    let step = |w: &Walker| Walker {
        position: (w.position + 3) % 7,
        steps_taken: w.steps_taken + 1,
    };
    let start = Walker {
        position: 0,
        steps_taken: 0,
    };
    let outcome = CycleAccelerator::new(FnTransition::new(step), |w: &Walker| w.position)
        .run(start, 1_000_003);
    assert_eq!(outcome.state().position, direct(0u8, 1_000_003, |p| (p + 3) % 7));
    assert_eq!(outcome.cycle().map(|c| c.period()), Some(7));
}

// ==============================================
// Phases
// ==============================================

#[test]
fn state_recurring_under_different_phase_is_not_reported() {
    // Swap then identity: (2, 1) is seen before the identity phase and again
    // before the swap phase. Only the return of (swap, (1, 2)) closes the cycle.
    let rotation = RoundRobin::new(|s: &(u8, u8)| (s.1, s.0)).then(|s: &(u8, u8)| *s);
    let outcome = CycleAccelerator::new(rotation, |s: &(u8, u8)| *s).run((1, 2), 1_001);

    let cycle = outcome.cycle().expect("cycle found");
    assert_eq!((cycle.first_occurrence(), cycle.period()), (0, 4));
    // Odd number of swaps.
    assert_eq!(*outcome.state(), (2, 1));
}

#[test]
fn phased_acceleration_matches_direct_rotation() {
    let build = || {
        RoundRobin::new(|s: &u64| (s * 3) % 101)
            .then(|s: &u64| (s + 17) % 101)
            .then(|s: &u64| (s * s) % 101)
    };
    for target in [0u64, 1, 2, 3, 4, 299, 300, 301, 5_000, 20_001] {
        let mut rotation = build();
        let expected = (0..target).fold(5u64, |s, step| rotation.apply(&s, step));
        assert_eq!(accelerate_phased(5, target, build(), |s| *s), expected, "N = {target}");
    }
}

// ==============================================
// Probe limit
// ==============================================

#[test]
fn probe_limit_bounds_history_and_keeps_answers_exact() {
    let step = |s: &u64| (s * 5 + 3) % 97;
    for limit in [1, 2, 10, 50, 1_000] {
        let config = AcceleratorConfig::new().probe_limit(limit);
        let mut accelerator =
            CycleAccelerator::with_config(FnTransition::new(step), |s: &u64| *s, config);
        for target in [0u64, 7, 96, 97, 5_000] {
            let outcome = accelerator.run(11, target);
            assert!(outcome.recorded_states() <= limit);
            assert_eq!(*outcome.state(), direct(11, target, step), "limit {limit} N {target}");
        }
    }
}

// ==============================================
// Random functional graphs
// ==============================================

fn random_graph(rng: &mut SmallRng, nodes: usize) -> Vec<usize> {
    (0..nodes).map(|_| rng.gen_range(0..nodes)).collect()
}

#[test]
fn seeded_random_graphs_agree_with_direct_simulation() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..200 {
        let nodes = rng.gen_range(1..64);
        let graph = random_graph(&mut rng, nodes);
        let start = rng.gen_range(0..nodes);
        let target = rng.gen_range(0..500u64);

        let next = |s: &usize| graph[*s];
        assert_eq!(accelerate(start, target, next, |s| *s), direct(start, target, next));
    }
}

proptest! {
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_functional_graph_matches_direct(
        graph in prop::collection::vec(0usize..32, 1..32),
        start in 0usize..32,
        target in 0u64..300,
    ) {
        let n = graph.len();
        let next = |s: &usize| graph[*s] % n;
        let start = start % n;
        prop_assert_eq!(accelerate(start, target, next, |s| *s), direct(start, target, next));
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_far_targets_fold_into_the_cycle(
        graph in prop::collection::vec(0usize..16, 1..16),
        start in 0usize..16,
        extra in 0u64..1_000_000_000,
    ) {
        // Any target past the cycle agrees with the target shifted back by a
        // whole number of periods.
        let n = graph.len();
        let next = |s: &usize| graph[*s] % n;
        let start = start % n;

        let target = 10_000 + extra;
        let outcome = CycleAccelerator::new(FnTransition::new(next), |s: &usize| *s)
            .run(start, target);
        let cycle = *outcome.cycle().expect("16 states must repeat");
        let period = cycle.period();
        let folded = cycle.loop_end() + (target - cycle.loop_end()) % period;
        prop_assert_eq!(*outcome.state(), direct(start, folded, next));
    }
}
