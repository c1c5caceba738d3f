// ==============================================
// SOLVER SAMPLE TESTS (integration)
// ==============================================
use std::sync::Arc;

use memokit::builder::MemoBuilder;
use memokit::memo::CacheRegistry;
use memokit::solvers::arrangements::{ArrangementCounter, Row, total_arrangements};
use memokit::solvers::platform::{Direction, Platform};

const RECORDS: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

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

// ==============================================
// Arrangements
// ==============================================

#[test]
fn arrangement_totals() {
    assert_eq!(total_arrangements(RECORDS, 1).unwrap(), 21);
    assert_eq!(total_arrangements(RECORDS, 5).unwrap(), 525_152);
}

#[test]
fn arrangement_cache_is_visible_in_a_shared_registry() {
    let registry = Arc::new(CacheRegistry::new());
    let counter = ArrangementCounter::with_builder(
        MemoBuilder::new()
            .name("arrangements")
            .registry(Arc::clone(&registry)),
    );

    let total: u64 = RECORDS
        .lines()
        .map(|line| counter.count(&line.parse::<Row>().unwrap().unfold(5)))
        .sum();
    assert_eq!(total, 525_152);

    let stats = registry.all_stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].name.as_deref(), Some("arrangements"));
    assert_eq!(stats[0].size, counter.stats().size);
    assert!(stats[0].size > 0);

    drop(counter);
    assert!(registry.all_stats().is_empty());
}

#[test]
fn blank_lines_are_skipped_and_bad_lines_reported() {
    let padded = format!("\n{RECORDS}\n\n");
    assert_eq!(total_arrangements(&padded, 1).unwrap(), 21);

    let err = total_arrangements("???.### 1,1,3\n???.### one\n", 1).unwrap_err();
    assert_eq!(err.line(), 2);
    assert!(err.to_string().starts_with("line 2: "));
}

// ==============================================
// Platform
// ==============================================

#[test]
fn platform_loads() {
    let platform: Platform = PLATFORM.parse().unwrap();
    assert_eq!(platform.tilted(Direction::North).north_load(), 136);
    assert_eq!(platform.spin_load(1_000_000_000), 64);
}

#[test]
fn platform_cycle_is_a_whole_number_of_spins() {
    let platform: Platform = PLATFORM.parse().unwrap();
    let outcome = platform.after_tilts(4_000_000_000);
    let cycle = outcome.cycle().expect("platform settles into a loop");
    assert_eq!(cycle.period() % 4, 0);
    assert!(outcome.transitions_applied() < 1_000);
}
