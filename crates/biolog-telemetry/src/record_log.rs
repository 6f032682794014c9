//! JSON-lines record log
//!
//! Appends one JSON object per record to a local file. Each line is the
//! serialized [`TelemetryRecord`] (tagged by `event`) plus a `timestamp`
//! field in RFC 3339 format, read from the sink's clock when the line is
//! written. Replays pass their manual clock so timestamps follow the
//! scripted timeline.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use biolog_core::domain::{
    AcquiredRecord, AuthenticatedRecord, EnrolledRecord, ErrorRecord, TelemetryRecord,
};
use biolog_core::ports::{IClock, IMetricsSink, SystemClock};
use serde_json::Value;
use tracing::warn;

/// Metrics sink that appends records to a JSON-lines file.
pub struct RecordLogSink {
    path: PathBuf,
    file: Mutex<File>,
    clock: Arc<dyn IClock>,
}

impl RecordLogSink {
    /// Opens `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replaces the clock used for line timestamps
    pub fn with_clock(mut self, clock: Arc<dyn IClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: TelemetryRecord) {
        if let Err(e) = self.try_append(&record) {
            warn!(
                path = %self.path.display(),
                event = record.event(),
                "Failed to append telemetry record: {}",
                e
            );
        }
    }

    fn try_append(&self, record: &TelemetryRecord) -> anyhow::Result<()> {
        let now_ms = self.clock.now_ms();
        let timestamp = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(now_ms)
            .ok_or_else(|| anyhow::anyhow!("clock value {} ms is out of range", now_ms))?;

        let mut value = serde_json::to_value(record)?;
        if let Value::Object(ref mut map) = value {
            map.insert(
                "timestamp".to_string(),
                Value::String(timestamp.to_rfc3339()),
            );
        }
        let mut line = serde_json::to_string(&value)?;
        line.push('\n');

        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow::anyhow!("record log lock poisoned"))?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

impl IMetricsSink for RecordLogSink {
    fn write_acquired(&self, record: &AcquiredRecord) {
        self.append(record.clone().into());
    }

    fn write_error(&self, record: &ErrorRecord) {
        self.append(record.clone().into());
    }

    fn write_authenticated(&self, record: &AuthenticatedRecord) {
        self.append(record.clone().into());
    }

    fn write_enrolled(&self, record: &EnrolledRecord) {
        self.append(record.clone().into());
    }
}
