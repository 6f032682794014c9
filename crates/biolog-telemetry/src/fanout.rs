//! Fan-out sink
//!
//! Forwards each record to every contained sink, in insertion order.

use std::sync::Arc;

use biolog_core::domain::{AcquiredRecord, AuthenticatedRecord, EnrolledRecord, ErrorRecord};
use biolog_core::ports::IMetricsSink;

/// Metrics sink that duplicates records to several sinks
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn IMetricsSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a destination
    pub fn with_sink(mut self, sink: Arc<dyn IMetricsSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl IMetricsSink for FanoutSink {
    fn write_acquired(&self, record: &AcquiredRecord) {
        for sink in &self.sinks {
            sink.write_acquired(record);
        }
    }

    fn write_error(&self, record: &ErrorRecord) {
        for sink in &self.sinks {
            sink.write_error(record);
        }
    }

    fn write_authenticated(&self, record: &AuthenticatedRecord) {
        for sink in &self.sinks {
            sink.write_authenticated(record);
        }
    }

    fn write_enrolled(&self, record: &EnrolledRecord) {
        for sink in &self.sinks {
            sink.write_enrolled(record);
        }
    }
}
