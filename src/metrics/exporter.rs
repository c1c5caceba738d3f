use std::io::Write;

use parking_lot::Mutex;

use crate::memo::MemoStats;
use crate::metrics::snapshot::{AccelerationMetricsSnapshot, MemoMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for memo and acceleration snapshots.
///
/// This exporter writes in the Prometheus text exposition format so it can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector. Write
/// failures are ignored: metrics are observational.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_labelled_gauges<'a>(
        &self,
        name: &str,
        label: &str,
        samples: impl Iterator<Item = (&'a str, u64)>,
    ) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        for (value_label, value) in samples {
            let _ = writeln!(
                writer,
                "{}{{{}=\"{}\"}} {}",
                name,
                label,
                escape_label(value_label),
                value
            );
        }
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

impl<W: Write + Send> MetricsExporter<MemoMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &MemoMetricsSnapshot) {
        self.write_counter(&self.metric_name("get_calls_total"), snapshot.get_calls);
        self.write_counter(&self.metric_name("hits_total"), snapshot.hits);
        self.write_counter(&self.metric_name("misses_total"), snapshot.misses);
        self.write_counter(&self.metric_name("inserts_total"), snapshot.inserts);
        self.write_counter(
            &self.metric_name("insert_races_total"),
            snapshot.insert_races,
        );
        self.write_counter(
            &self.metric_name("failed_computes_total"),
            snapshot.failed_computes,
        );
        self.write_gauge(&self.metric_name("entries"), snapshot.cache_len as u64);
    }
}

impl<W: Write + Send> MetricsExporter<AccelerationMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &AccelerationMetricsSnapshot) {
        self.write_gauge(&self.metric_name("target_step"), snapshot.target_step);
        self.write_counter(
            &self.metric_name("transitions_applied_total"),
            snapshot.transitions_applied,
        );
        self.write_gauge(
            &self.metric_name("recorded_states"),
            snapshot.recorded_states,
        );
        self.write_gauge(
            &self.metric_name("cycle_found"),
            u64::from(snapshot.cycle_found),
        );
        self.write_gauge(
            &self.metric_name("cycle_first_occurrence"),
            snapshot.first_occurrence,
        );
        self.write_gauge(&self.metric_name("cycle_period"), snapshot.period);
    }
}

/// Exports one `entries{cache="..."}` sample per registered cache.
impl<W: Write + Send> MetricsExporter<Vec<MemoStats>> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &Vec<MemoStats>) {
        self.write_labelled_gauges(
            &self.metric_name("cache_entries"),
            "cache",
            snapshot
                .iter()
                .map(|stats| (stats.display_name(), stats.size as u64)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exported<S>(prefix: &str, snapshot: &S) -> String
    where
        PrometheusTextExporter<Vec<u8>>: MetricsExporter<S>,
    {
        let exporter = PrometheusTextExporter::new(prefix, Vec::new());
        exporter.export(snapshot);
        String::from_utf8(exporter.into_inner()).expect("exporter writes utf-8")
    }

    #[test]
    fn memo_snapshot_uses_prefix() {
        let snapshot = MemoMetricsSnapshot {
            get_calls: 10,
            hits: 7,
            misses: 3,
            inserts: 3,
            cache_len: 3,
            ..MemoMetricsSnapshot::default()
        };
        let text = exported("memo", &snapshot);
        assert!(text.contains("# TYPE memo_hits_total counter\nmemo_hits_total 7\n"));
        assert!(text.contains("memo_entries 3\n"));
    }

    #[test]
    fn empty_prefix_keeps_bare_names() {
        let text = exported("", &MemoMetricsSnapshot::default());
        assert!(text.contains("\nget_calls_total 0\n"));
    }

    #[test]
    fn acceleration_snapshot_reports_cycle() {
        let snapshot = AccelerationMetricsSnapshot {
            target_step: 1_000_000,
            transitions_applied: 5,
            recorded_states: 5,
            cycle_found: true,
            first_occurrence: 0,
            period: 5,
        };
        let text = exported("accel", &snapshot);
        assert!(text.contains("accel_cycle_found 1\n"));
        assert!(text.contains("accel_cycle_period 5\n"));
    }

    #[test]
    fn registry_stats_are_labelled_and_escaped() {
        let stats = vec![
            MemoStats::new(Some("fib".into()), 90),
            MemoStats::new(Some("say \"hi\"".into()), 1),
            MemoStats::new(None, 0),
        ];
        let text = exported("memokit", &stats);
        assert!(text.contains("memokit_cache_entries{cache=\"fib\"} 90\n"));
        assert!(text.contains("memokit_cache_entries{cache=\"say \\\"hi\\\"\"} 1\n"));
        assert!(text.contains("memokit_cache_entries{cache=\"<anonymous>\"} 0\n"));
    }
}
