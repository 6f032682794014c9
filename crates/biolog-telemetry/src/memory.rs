//! In-process record buffer
//!
//! Keeps every record in arrival order. Used by the replay command and by
//! tests that need to look at exactly what the recorder emitted.

use std::sync::Mutex;

use biolog_core::domain::{
    AcquiredRecord, AuthenticatedRecord, EnrolledRecord, ErrorRecord, TelemetryRecord,
};
use biolog_core::ports::IMetricsSink;

/// Metrics sink that stores records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<TelemetryRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records written so far
    pub fn records(&self) -> Vec<TelemetryRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.records.lock() {
            Ok(records) => records.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        match self.records.lock() {
            Ok(mut records) => records.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    fn push(&self, record: TelemetryRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}

impl IMetricsSink for MemorySink {
    fn write_acquired(&self, record: &AcquiredRecord) {
        self.push(record.clone().into());
    }

    fn write_error(&self, record: &ErrorRecord) {
        self.push(record.clone().into());
    }

    fn write_authenticated(&self, record: &AuthenticatedRecord) {
        self.push(record.clone().into());
    }

    fn write_enrolled(&self, record: &EnrolledRecord) {
        self.push(record.clone().into());
    }
}
