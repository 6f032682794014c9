//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates or are
//! supplied by the embedding application.
//!
//! ## Ports Overview
//!
//! - [`IMetricsSink`] - Append-only destination for telemetry records
//! - [`IClock`] - Wall-clock source in milliseconds
//! - [`IDebugSettings`] - Per-subject debug-mode lookup

pub mod clock;
pub mod debug_settings;
pub mod metrics_sink;

pub use clock::{IClock, ManualClock, SystemClock};
pub use debug_settings::{IDebugSettings, StaticDebugSettings};
pub use metrics_sink::IMetricsSink;
