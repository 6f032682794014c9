//! BioLog Core - Domain logic for biometric operation telemetry
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `Classification`, `SubjectId`, `AcquiredInfo`, telemetry records, latency rules
//! - **Use cases** - `OperationRecorder`, the per-attempt telemetry recorder
//! - **Port definitions** - Traits for adapters: `IMetricsSink`, `IClock`, `IDebugSettings`
//!
//! # Architecture
//!
//! The domain module contains pure value types with no I/O.
//! Ports define trait interfaces that adapter crates implement
//! (see `biolog-telemetry` for the metrics sinks).
//! The recorder use case renders one record per lifecycle event and hands it
//! to the metrics sink port, subject to the classification gate.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
