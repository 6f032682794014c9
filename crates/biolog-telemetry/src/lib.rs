//! BioLog Telemetry - Metrics sink adapters
//!
//! Provides implementations of `biolog_core::ports::IMetricsSink`:
//! - `PrometheusMetricsSink`: Prometheus counters and latency histograms
//! - `RecordLogSink`: JSON-lines file with one entry per record
//! - `MemorySink`: In-process buffer of records
//! - `FanoutSink`: Forwards every record to several sinks
//!
//! None of the adapters report failures to the recorder; I/O problems are
//! logged with `tracing::warn!` and the record is dropped.

pub mod fanout;
pub mod memory;
pub mod metrics;
pub mod record_log;

pub use fanout::FanoutSink;
pub use memory::MemorySink;
pub use metrics::PrometheusMetricsSink;
pub use record_log::RecordLogSink;
