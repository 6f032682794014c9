//! Operation telemetry recorder
//!
//! One [`OperationRecorder`] is created per biometric attempt and dropped
//! when the attempt concludes. It remembers when the first usable signal
//! arrived, derives latencies from it, and hands one record per lifecycle
//! event to the metrics sink.
//!
//! ## Gate
//!
//! If any axis of the attempt's [`Classification`] is `Unknown`, no record
//! is written for any event. Local diagnostics are still emitted, latencies
//! included.
//!
//! ## Failure handling
//!
//! Nothing here returns an error. Negative latencies are logged with
//! `tracing::warn!` and replaced by the `-1` sentinel.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::domain::{
    check_latency, elapsed_since, AcquiredInfo, AcquiredRecord, Action, AuthenticatedRecord,
    AuthenticationState, Classification, ClientCategory, EnrolledRecord, ErrorCode, ErrorRecord,
    Modality, SubjectId, VendorCode, NO_LATENCY,
};
use crate::ports::{IClock, IDebugSettings, IMetricsSink, StaticDebugSettings, SystemClock};

// ============================================================================
// TelemetryContext
// ============================================================================

/// Process-wide dependencies of every recorder
///
/// Cheap to clone; hand a clone (or a reference) to each attempt.
#[derive(Clone)]
pub struct TelemetryContext {
    sink: Arc<dyn IMetricsSink>,
    clock: Arc<dyn IClock>,
    debug_settings: Arc<dyn IDebugSettings>,
    verbose: bool,
}

impl TelemetryContext {
    /// Creates a context writing to `sink`, reading the system clock, with
    /// debug mode off for every subject and terse diagnostics.
    pub fn new(sink: Arc<dyn IMetricsSink>) -> Self {
        Self {
            sink,
            clock: Arc::new(SystemClock),
            debug_settings: Arc::new(StaticDebugSettings::disabled()),
            verbose: false,
        }
    }

    /// Creates a context from the `logging` and `debug` config sections
    pub fn from_config(config: &Config, sink: Arc<dyn IMetricsSink>) -> Self {
        Self::new(sink)
            .with_debug_settings(Arc::new(StaticDebugSettings::from_config(&config.debug)))
            .with_verbose_logging(config.logging.verbose_events)
    }

    /// Replaces the wall clock
    pub fn with_clock(mut self, clock: Arc<dyn IClock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the per-subject debug-mode lookup
    pub fn with_debug_settings(mut self, settings: Arc<dyn IDebugSettings>) -> Self {
        self.debug_settings = settings;
        self
    }

    /// Logs every event field locally instead of latencies only
    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl std::fmt::Debug for TelemetryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryContext")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// OperationRecorder
// ============================================================================

/// Telemetry recorder for a single biometric attempt
#[derive(Debug)]
pub struct OperationRecorder {
    context: TelemetryContext,
    classification: Classification,
    is_crypto: bool,
    /// Wall-clock ms of the first qualifying acquisition signal
    first_signal_ms: Option<i64>,
}

impl OperationRecorder {
    /// Creates a recorder for a new attempt
    pub fn new(context: TelemetryContext, classification: Classification) -> Self {
        Self {
            context,
            classification,
            is_crypto: false,
            first_signal_ms: None,
        }
    }

    /// Marks the attempt as backing a cryptographic operation
    pub fn with_crypto_operation(mut self, is_crypto: bool) -> Self {
        self.is_crypto = is_crypto;
        self
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn modality(&self) -> Modality {
        self.classification.modality
    }

    pub fn action(&self) -> Action {
        self.classification.action
    }

    pub fn client(&self) -> ClientCategory {
        self.classification.client
    }

    pub fn is_crypto_operation(&self) -> bool {
        self.is_crypto
    }

    /// Timestamp of the first qualifying signal, if one has been seen
    pub fn first_signal_ms(&self) -> Option<i64> {
        self.first_signal_ms
    }

    /// Reports an acquisition signal.
    ///
    /// The first signal that marks the start of acquisition for this
    /// modality becomes the latency origin; later ones leave it untouched.
    pub fn report_acquired(
        &mut self,
        acquired_info: AcquiredInfo,
        vendor_code: VendorCode,
        subject: SubjectId,
    ) {
        if self.first_signal_ms.is_none() && self.modality().is_first_signal(acquired_info) {
            self.first_signal_ms = Some(self.context.clock.now_ms());
        }

        if self.context.verbose {
            debug!(
                modality = %self.modality(),
                subject = %subject,
                is_crypto = self.is_crypto,
                action = %self.action(),
                client = %self.client(),
                acquired_info = %acquired_info,
                vendor_code = %vendor_code,
                "Acquired"
            );
        } else {
            trace!(acquired_info = %acquired_info, "Acquired");
        }

        if self.classification.is_any_field_unknown() {
            return;
        }

        self.context.sink.write_acquired(&AcquiredRecord {
            modality: self.modality(),
            subject,
            is_crypto: self.is_crypto,
            action: self.action(),
            client: self.client(),
            acquired_info,
            vendor_code,
            debug_enabled: self.context.debug_settings.is_debug_enabled(subject),
        });
    }

    /// Reports an error that ends the attempt.
    ///
    /// Latency is measured from the first signal, `-1` if there was none.
    pub fn report_error(&self, error: ErrorCode, vendor_code: VendorCode, subject: SubjectId) {
        let latency = self.latency_since_first_signal();

        if self.context.verbose {
            debug!(
                modality = %self.modality(),
                subject = %subject,
                is_crypto = self.is_crypto,
                action = %self.action(),
                client = %self.client(),
                error = %error,
                vendor_code = %vendor_code,
                latency_ms = latency,
                "Error"
            );
        } else {
            debug!(latency_ms = latency, "Error latency");
        }

        if self.classification.is_any_field_unknown() {
            return;
        }

        self.context.sink.write_error(&ErrorRecord {
            modality: self.modality(),
            subject,
            is_crypto: self.is_crypto,
            action: self.action(),
            client: self.client(),
            error,
            vendor_code,
            debug_enabled: self.context.debug_settings.is_debug_enabled(subject),
            latency_ms: sanitize_latency(latency),
        });
    }

    /// Reports an authentication decision.
    ///
    /// `is_prompt` tells whether the attempt runs inside the system
    /// biometric prompt; only there can a match wait for confirmation.
    /// The emitted state is never [`AuthenticationState::Unknown`].
    pub fn report_authenticated(
        &self,
        authenticated: bool,
        require_confirmation: bool,
        subject: SubjectId,
        is_prompt: bool,
    ) {
        let state = AuthenticationState::derive(authenticated, require_confirmation, is_prompt);
        let latency = self.latency_since_first_signal();

        if self.context.verbose {
            debug!(
                modality = %self.modality(),
                subject = %subject,
                is_crypto = self.is_crypto,
                client = %self.client(),
                require_confirmation,
                state = %state,
                latency_ms = latency,
                "Authenticated"
            );
        } else {
            debug!(latency_ms = latency, "Authentication latency");
        }

        if self.classification.is_any_field_unknown() {
            return;
        }

        self.context.sink.write_authenticated(&AuthenticatedRecord {
            modality: self.modality(),
            subject,
            is_crypto: self.is_crypto,
            client: self.client(),
            require_confirmation,
            state,
            latency_ms: sanitize_latency(latency),
            debug_enabled: self.context.debug_settings.is_debug_enabled(subject),
        });
    }

    /// Reports a finished enrollment.
    ///
    /// The caller measures enrollment duration itself; the first-signal
    /// origin is neither read nor changed.
    pub fn report_enrolled(&self, subject: SubjectId, latency_ms: i64, success: bool) {
        if self.context.verbose {
            debug!(
                modality = %self.modality(),
                subject = %subject,
                client = %self.client(),
                latency_ms,
                success,
                "Enrolled"
            );
        } else {
            debug!(latency_ms, "Enroll latency");
        }

        if self.classification.is_any_field_unknown() {
            return;
        }

        self.context.sink.write_enrolled(&EnrolledRecord {
            modality: self.modality(),
            subject,
            latency_ms: sanitize_latency(latency_ms),
            success,
        });
    }

    fn latency_since_first_signal(&self) -> i64 {
        elapsed_since(self.first_signal_ms, self.context.clock.now_ms())
    }
}

/// Replaces an impossible latency with the sentinel, logging the anomaly
fn sanitize_latency(latency_ms: i64) -> i64 {
    match check_latency(latency_ms) {
        Ok(latency) => latency,
        Err(e) => {
            warn!(error = %e, "Found a negative latency");
            NO_LATENCY
        }
    }
}
