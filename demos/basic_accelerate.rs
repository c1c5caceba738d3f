//! Resolving far-future simulation steps through cycle detection.
//!
//! Run with: cargo run --example basic_accelerate

use memokit::cycle::{AcceleratorConfig, CycleAccelerator, FnTransition, accelerate};
use memokit::solvers::platform::{Direction, Platform};

const PLATFORM: &str = "\
O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Cycle Acceleration Examples ===\n");

    // Example 1: the thin entry point
    println!("1. (s + 1) mod 5 after a million steps");
    let state = accelerate(0u32, 1_000_000, |s: &u32| (s + 1) % 5, |s: &u32| *s);
    println!("   state = {state}");
    println!();

    // Example 2: inspecting the outcome
    println!("2. Outcome details");
    let step = FnTransition::new(|s: &u64| (s * s + 1) % 1_000_003);
    let mut accelerator = CycleAccelerator::new(step, |s: &u64| *s);
    let outcome = accelerator.run(2, 1_000_000_000_000);
    match outcome.cycle() {
        Some(cycle) => println!(
            "   state = {}, cycle first seen at {} with period {}, {} transitions applied",
            outcome.state(),
            cycle.first_occurrence(),
            cycle.period(),
            outcome.transitions_applied()
        ),
        None => println!("   state = {} (no cycle before target)", outcome.state()),
    }
    println!();

    // Example 3: bounded history
    println!("3. Probe limit");
    let mut bounded = CycleAccelerator::with_config(
        FnTransition::new(|s: &u64| s + 1),
        |s: &u64| *s,
        AcceleratorConfig::new().probe_limit(1_000),
    );
    let outcome = bounded.run(0, 50_000);
    println!(
        "   state = {}, recorded {} states, accelerated: {}",
        outcome.state(),
        outcome.recorded_states(),
        outcome.is_accelerated()
    );
    println!();

    // Example 4: a four-phase transition
    println!("4. Tilting platform (RUST_LOG=memokit=debug shows the loop)");
    let platform: Platform = PLATFORM.parse().expect("valid platform");
    let north = platform.tilted(Direction::North);
    println!("   load after one north tilt: {}", north.north_load());
    println!("   load after 1e9 spin cycles: {}", platform.spin_load(1_000_000_000));
}
