use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::SlruPolicyMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for SLRU policy snapshots.
///
/// Writes the Prometheus text exposition format so the output can be
/// scraped directly or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        // A poisoned lock still holds a usable writer.
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<SlruPolicyMetricsSnapshot>
    for PrometheusTextExporter<W>
{
    fn export(&self, snapshot: &SlruPolicyMetricsSnapshot) {
        self.counter("touch_calls_total", snapshot.touch_calls);
        self.counter("protected_touches_total", snapshot.protected_touches);
        self.counter("promotions_total", snapshot.promotions);
        self.counter("swap_demotions_total", snapshot.swap_demotions);
        self.counter("unpromoted_touches_total", snapshot.unpromoted_touches);
        self.counter("reset_calls_total", snapshot.reset_calls);
        self.counter("protected_resets_total", snapshot.protected_resets);
        self.counter("invalidate_calls_total", snapshot.invalidate_calls);
        self.counter(
            "protected_invalidations_total",
            snapshot.protected_invalidations,
        );
        self.counter("victim_calls_total", snapshot.victim_calls);
        self.counter("probation_victims_total", snapshot.probation_victims);
        self.counter("protected_victims_total", snapshot.protected_victims);

        self.gauge("protected_len", snapshot.protected_len);
        self.gauge("protected_capacity", snapshot.protected_capacity);
        self.gauge("probation_capacity", snapshot.probation_capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("l2_slru", Vec::new());
        let snapshot = SlruPolicyMetricsSnapshot {
            promotions: 7,
            protected_len: 3,
            ..Default::default()
        };

        exporter.export(&snapshot);
        let text = String::from_utf8(exporter.into_inner()).unwrap();

        assert!(text.contains("# TYPE l2_slru_promotions_total counter\n"));
        assert!(text.contains("l2_slru_promotions_total 7\n"));
        assert!(text.contains("# TYPE l2_slru_protected_len gauge\n"));
        assert!(text.contains("l2_slru_protected_len 3\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&SlruPolicyMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.starts_with("# TYPE touch_calls_total counter\n"));
    }
}
