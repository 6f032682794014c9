//! Domain entities and business rules
//!
//! This module contains the core domain types for BioLog:
//! - Classification of an operation attempt (modality, action, client)
//! - Newtypes for subject identifiers and HAL signal/error codes
//! - Telemetry records emitted per lifecycle event
//! - Latency computation and sanitization rules
//! - Domain-specific error types

pub mod classification;
pub mod errors;
pub mod latency;
pub mod newtypes;
pub mod records;

// Re-export commonly used types
pub use classification::{Action, Classification, ClientCategory, Modality};
pub use errors::DomainError;
pub use latency::{check_latency, elapsed_since, NO_LATENCY};
pub use newtypes::*;
pub use records::{
    AcquiredRecord, AuthenticatedRecord, AuthenticationState, EnrolledRecord, ErrorRecord,
    TelemetryRecord,
};
