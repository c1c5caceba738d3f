use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use memokit::cycle::{AcceleratorConfig, CycleAccelerator, FnTransition, accelerate};
use memokit::solvers::platform::Platform;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

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

fn bench_mod_cycle(c: &mut Criterion) {
    c.bench_function("accelerate_mod_1000_to_1e12", |b| {
        b.iter(|| {
            black_box(accelerate(
                0u64,
                black_box(1_000_000_000_000),
                |s: &u64| (s + 1) % 1_000,
                |s: &u64| *s,
            ))
        })
    });
}

fn bench_random_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("accelerate_random_graph");
    for nodes in [64usize, 1_024, 16_384] {
        let mut rng = SmallRng::seed_from_u64(42);
        let graph: Vec<usize> = (0..nodes).map(|_| rng.gen_range(0..nodes)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &graph, |b, graph| {
            b.iter(|| black_box(accelerate(0usize, 1_000_000_000, |s: &usize| graph[*s], |s| *s)))
        });
    }
    group.finish();
}

fn bench_probe_limited(c: &mut Criterion) {
    c.bench_function("probe_limited_direct_fallback", |b| {
        let config = AcceleratorConfig::new().probe_limit(64);
        let mut accelerator = CycleAccelerator::with_config(
            FnTransition::new(|s: &u64| s.wrapping_mul(6364136223846793005).wrapping_add(1)),
            |s: &u64| *s,
            config,
        );
        b.iter(|| black_box(accelerator.run(black_box(1), 10_000)))
    });
}

fn bench_platform_spin(c: &mut Criterion) {
    let platform: Platform = PLATFORM.parse().expect("valid platform");
    c.bench_function("platform_spin_load_1e9", |b| {
        b.iter(|| black_box(platform.spin_load(black_box(1_000_000_000))))
    });
}

criterion_group!(
    benches,
    bench_mod_cycle,
    bench_random_graph,
    bench_probe_limited,
    bench_platform_spin
);
criterion_main!(benches);
