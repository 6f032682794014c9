//! Metrics sink port (driven/secondary port)
//!
//! This module defines the interface the recorder writes telemetry records
//! to. Implementations may aggregate records into Prometheus metrics, append
//! them to a log file, or forward them to a platform statistics service.
//!
//! ## Design Notes
//!
//! - Methods are synchronous and return nothing: the recorder never waits
//!   for, or reacts to, the outcome of a write.
//! - Implementations must not block and must absorb their own failures
//!   (log with `tracing::warn!` and drop the record).
//! - Records arrive already gated and sanitized.

use crate::domain::{
    AcquiredRecord, AuthenticatedRecord, EnrolledRecord, ErrorRecord, TelemetryRecord,
};

/// Port trait for the outbound telemetry path
///
/// One write operation per event kind. The sink is shared across all
/// recorders of a process, hence `Send + Sync`.
pub trait IMetricsSink: Send + Sync {
    /// Records an acquisition signal
    fn write_acquired(&self, record: &AcquiredRecord);

    /// Records an error that ended an attempt
    fn write_error(&self, record: &ErrorRecord);

    /// Records an authentication decision
    fn write_authenticated(&self, record: &AuthenticatedRecord);

    /// Records a finished enrollment
    fn write_enrolled(&self, record: &EnrolledRecord);

    /// Dispatches a tagged record to the matching write method
    fn write(&self, record: &TelemetryRecord) {
        match record {
            TelemetryRecord::Acquired(r) => self.write_acquired(r),
            TelemetryRecord::Error(r) => self.write_error(r),
            TelemetryRecord::Authenticated(r) => self.write_authenticated(r),
            TelemetryRecord::Enrolled(r) => self.write_enrolled(r),
        }
    }
}
