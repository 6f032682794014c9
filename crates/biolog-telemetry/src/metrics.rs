//! Prometheus metrics sink for BioLog
//!
//! Aggregates telemetry records into labeled counters and a latency
//! histogram. Only classification axes, codes and outcomes become labels;
//! subject ids, vendor codes and debug flags never leave the record.

use biolog_core::config::TelemetryConfig;
use biolog_core::domain::{
    AcquiredRecord, AuthenticatedRecord, EnrolledRecord, ErrorRecord, Modality, NO_LATENCY,
};
use biolog_core::ports::IMetricsSink;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Metrics sink backed by a dedicated Prometheus registry.
pub struct PrometheusMetricsSink {
    registry: Registry,
    /// Counter: acquisition signals by (modality, action, client, acquired_info)
    pub acquired_total: IntCounterVec,
    /// Counter: errors by (modality, action, client, error)
    pub errors_total: IntCounterVec,
    /// Counter: authentication decisions by (modality, client, state, crypto)
    pub authentications_total: IntCounterVec,
    /// Counter: finished enrollments by (modality, result)
    pub enrollments_total: IntCounterVec,
    /// Histogram: measured latency in milliseconds by (event, modality)
    pub operation_latency_ms: HistogramVec,
    /// Counter: records carrying the `-1` sentinel latency, by event
    pub missing_latency_total: IntCounterVec,
}

impl PrometheusMetricsSink {
    /// Creates a sink with all metrics registered under `config.namespace`.
    pub fn new(config: &TelemetryConfig) -> anyhow::Result<Self> {
        // Histogram children are created lazily; reject bad buckets up front
        // instead of panicking on the first observation.
        if config.latency_buckets_ms.windows(2).any(|w| w[0] >= w[1]) {
            anyhow::bail!(
                "latency buckets must be strictly increasing: {:?}",
                config.latency_buckets_ms
            );
        }

        let registry = Registry::new_custom(Some(config.namespace.clone()), None)?;

        let acquired_total = IntCounterVec::new(
            Opts::new("acquired_total", "Acquisition signals observed"),
            &["modality", "action", "client", "acquired_info"],
        )?;
        registry.register(Box::new(acquired_total.clone()))?;

        let errors_total = IntCounterVec::new(
            Opts::new("errors_total", "Attempts that ended with an error"),
            &["modality", "action", "client", "error"],
        )?;
        registry.register(Box::new(errors_total.clone()))?;

        let authentications_total = IntCounterVec::new(
            Opts::new("authentications_total", "Authentication decisions"),
            &["modality", "client", "state", "crypto"],
        )?;
        registry.register(Box::new(authentications_total.clone()))?;

        let enrollments_total = IntCounterVec::new(
            Opts::new("enrollments_total", "Finished enrollments"),
            &["modality", "result"],
        )?;
        registry.register(Box::new(enrollments_total.clone()))?;

        let operation_latency_ms = HistogramVec::new(
            HistogramOpts::new(
                "operation_latency_ms",
                "Latency from first signal to outcome in milliseconds",
            )
            .buckets(config.latency_buckets_ms.clone()),
            &["event", "modality"],
        )?;
        registry.register(Box::new(operation_latency_ms.clone()))?;

        let missing_latency_total = IntCounterVec::new(
            Opts::new(
                "missing_latency_total",
                "Outcomes reported without a measurable latency",
            ),
            &["event"],
        )?;
        registry.register(Box::new(missing_latency_total.clone()))?;

        Ok(Self {
            registry,
            acquired_total,
            errors_total,
            authentications_total,
            enrollments_total,
            operation_latency_ms,
            missing_latency_total,
        })
    }

    /// The underlying registry, for embedding into an existing exporter.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn observe_latency(&self, event: &str, modality: Modality, latency_ms: i64) {
        if latency_ms == NO_LATENCY {
            self.missing_latency_total.with_label_values(&[event]).inc();
            return;
        }
        self.operation_latency_ms
            .with_label_values(&[event, modality.as_str()])
            .observe(latency_ms as f64);
    }
}

impl IMetricsSink for PrometheusMetricsSink {
    fn write_acquired(&self, record: &AcquiredRecord) {
        let info = record.acquired_info.to_string();
        self.acquired_total
            .with_label_values(&[
                record.modality.as_str(),
                record.action.as_str(),
                record.client.as_str(),
                &info,
            ])
            .inc();
    }

    fn write_error(&self, record: &ErrorRecord) {
        let error = record.error.to_string();
        self.errors_total
            .with_label_values(&[
                record.modality.as_str(),
                record.action.as_str(),
                record.client.as_str(),
                &error,
            ])
            .inc();
        self.observe_latency("error", record.modality, record.latency_ms);
    }

    fn write_authenticated(&self, record: &AuthenticatedRecord) {
        let crypto = if record.is_crypto { "true" } else { "false" };
        self.authentications_total
            .with_label_values(&[
                record.modality.as_str(),
                record.client.as_str(),
                record.state.as_str(),
                crypto,
            ])
            .inc();
        self.observe_latency("authenticated", record.modality, record.latency_ms);
    }

    fn write_enrolled(&self, record: &EnrolledRecord) {
        let result = if record.success { "success" } else { "failure" };
        self.enrollments_total
            .with_label_values(&[record.modality.as_str(), result])
            .inc();
        self.observe_latency("enrolled", record.modality, record.latency_ms);
    }
}
