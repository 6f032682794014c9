//! Use cases (interactors) for BioLog
//!
//! This module contains the application use cases that orchestrate
//! domain types and port interfaces.
//!
//! ## Use Cases
//!
//! - [`OperationRecorder`] - Per-attempt lifecycle telemetry with the
//!   classification gate and latency tracking
//! - [`TelemetryContext`] - Process-wide dependencies shared by recorders

pub mod record_operation;

pub use record_operation::{OperationRecorder, TelemetryContext};
