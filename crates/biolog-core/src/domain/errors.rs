//! Domain error types
//!
//! This module defines error types specific to domain operations. None of
//! them escape the recorder: they are turned into local diagnostics and
//! sentinel values before a record is emitted.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A latency below the `-1` sentinel (clock skew, ordering violation)
    #[error("Negative latency: {0} ms")]
    NegativeLatency(i64),

    /// A classification name that does not match any known variant
    #[error("Unknown {kind}: {value}")]
    UnknownVariant {
        /// Which enumeration was being parsed
        kind: &'static str,
        /// The offending input
        value: String,
    },
}
