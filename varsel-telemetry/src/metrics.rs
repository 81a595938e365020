//! Prometheus metrics for the reporting pipeline.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub ingested_events: prometheus::Counter,
    pub reports_sent: prometheus::Counter,
    pub sink_failures: prometheus::Counter,
    pub dispatch_latency: prometheus::Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let ingested_events =
            Counter::new("varsel_events_total", "Total classified events ingested").unwrap();
        let reports_sent =
            Counter::new("varsel_reports_sent_total", "Status reports delivered to the sink")
                .unwrap();
        let sink_failures = Counter::new(
            "varsel_sink_failures_total",
            "Status reports dropped on sink failure or timeout",
        )
        .unwrap();

        let dispatch_latency = Histogram::with_opts(
            HistogramOpts::new(
                "varsel_dispatch_latency_ns",
                "Report dispatch time including sink delivery",
            )
            .buckets(vec![10_000.0, 100_000.0, 1_000_000.0, 100_000_000.0]),
        )
        .unwrap();

        registry.register(Box::new(ingested_events.clone())).unwrap();
        registry.register(Box::new(reports_sent.clone())).unwrap();
        registry.register(Box::new(sink_failures.clone())).unwrap();
        registry.register(Box::new(dispatch_latency.clone())).unwrap();

        Self {
            registry,
            ingested_events,
            reports_sent,
            sink_failures,
            dispatch_latency,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_gathered_output() {
        let metrics = MetricsRecorder::new();
        metrics.ingested_events.inc();
        metrics.reports_sent.inc();

        let output = metrics.gather_metrics().unwrap();
        assert!(output.contains("varsel_events_total 1"));
        assert!(output.contains("varsel_reports_sent_total 1"));
    }
}
