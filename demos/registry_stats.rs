//! Reporting every live memo cache, with access counters, in Prometheus
//! text format.
//!
//! Run with: cargo run --example registry_stats --features metrics

use memokit::memo::{CacheRegistry, memoize_named};
use memokit::metrics::exporter::PrometheusTextExporter;
use memokit::metrics::traits::MetricsExporter;
use memokit::solvers::arrangements::total_arrangements;
use memokit::traits::MemoStatsSource;

const RECORDS: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cube = memoize_named("cube", |n: u64| n * n * n);
    for n in [2, 3, 2, 2, 5] {
        cube.call(n);
    }
    let total = total_arrangements(RECORDS, 5).expect("valid records");
    println!("arrangements: {total}\n");

    let registry = CacheRegistry::global();
    registry.log_stats();

    for (stats, metrics) in registry.all_metrics() {
        println!(
            "{stats}: {} lookups, hit ratio {:.2}",
            metrics.get_calls,
            metrics.hit_ratio()
        );
    }
    println!();

    let exporter = PrometheusTextExporter::new("memokit", Vec::new());
    exporter.export(&registry.all_stats());
    exporter.export(&cube.cache().metrics_snapshot());
    let text = String::from_utf8(exporter.into_inner()).expect("exporter writes UTF-8");
    print!("{text}");
}
