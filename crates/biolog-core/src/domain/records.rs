//! Telemetry records
//!
//! One record type per lifecycle event. Records are built by the recorder
//! after the classification gate has passed and carry sanitized latencies
//! only; sinks can forward them without further validation.

use serde::{Deserialize, Serialize};

use super::classification::{Action, ClientCategory, Modality};
use super::newtypes::{AcquiredInfo, ErrorCode, SubjectId, VendorCode};

// ============================================================================
// AuthenticationState
// ============================================================================

/// Outcome of an authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationState {
    /// Outcome not determined.
    ///
    /// [`AuthenticationState::derive`] never produces this variant; it exists
    /// so the state space matches the downstream metric schema.
    Unknown,
    /// The presented biometric did not match
    Rejected,
    /// Matched, but the prompt still waits for an explicit user confirmation
    PendingConfirmation,
    /// Matched and accepted
    Confirmed,
}

impl AuthenticationState {
    /// Derives the outcome of an authentication event.
    ///
    /// | authenticated | prompt && require_confirmation | state                 |
    /// |---------------|--------------------------------|-----------------------|
    /// | false         | any                            | `Rejected`            |
    /// | true          | true                           | `PendingConfirmation` |
    /// | true          | false                          | `Confirmed`           |
    pub fn derive(authenticated: bool, require_confirmation: bool, is_prompt: bool) -> Self {
        if !authenticated {
            AuthenticationState::Rejected
        } else if is_prompt && require_confirmation {
            AuthenticationState::PendingConfirmation
        } else {
            AuthenticationState::Confirmed
        }
    }

    /// Stable snake_case name, used for metric labels
    pub const fn as_str(self) -> &'static str {
        match self {
            AuthenticationState::Unknown => "unknown",
            AuthenticationState::Rejected => "rejected",
            AuthenticationState::PendingConfirmation => "pending_confirmation",
            AuthenticationState::Confirmed => "confirmed",
        }
    }
}

impl std::fmt::Display for AuthenticationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Records
// ============================================================================

/// An acquisition signal was observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquiredRecord {
    pub modality: Modality,
    pub subject: SubjectId,
    pub is_crypto: bool,
    pub action: Action,
    pub client: ClientCategory,
    pub acquired_info: AcquiredInfo,
    pub vendor_code: VendorCode,
    pub debug_enabled: bool,
}

/// The attempt ended with an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub modality: Modality,
    pub subject: SubjectId,
    pub is_crypto: bool,
    pub action: Action,
    pub client: ClientCategory,
    pub error: ErrorCode,
    pub vendor_code: VendorCode,
    pub debug_enabled: bool,
    /// Milliseconds since the first signal, or `-1`
    pub latency_ms: i64,
}

/// An authentication decision was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedRecord {
    pub modality: Modality,
    pub subject: SubjectId,
    pub is_crypto: bool,
    pub client: ClientCategory,
    pub require_confirmation: bool,
    pub state: AuthenticationState,
    /// Milliseconds since the first signal, or `-1`
    pub latency_ms: i64,
    pub debug_enabled: bool,
}

/// An enrollment finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledRecord {
    pub modality: Modality,
    pub subject: SubjectId,
    /// Caller-measured duration, or `-1`
    pub latency_ms: i64,
    pub success: bool,
}

/// Any telemetry record, tagged by event kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryRecord {
    Acquired(AcquiredRecord),
    Error(ErrorRecord),
    Authenticated(AuthenticatedRecord),
    Enrolled(EnrolledRecord),
}

impl TelemetryRecord {
    /// Event kind name, matching the serde tag
    pub fn event(&self) -> &'static str {
        match self {
            TelemetryRecord::Acquired(_) => "acquired",
            TelemetryRecord::Error(_) => "error",
            TelemetryRecord::Authenticated(_) => "authenticated",
            TelemetryRecord::Enrolled(_) => "enrolled",
        }
    }

    pub fn modality(&self) -> Modality {
        match self {
            TelemetryRecord::Acquired(r) => r.modality,
            TelemetryRecord::Error(r) => r.modality,
            TelemetryRecord::Authenticated(r) => r.modality,
            TelemetryRecord::Enrolled(r) => r.modality,
        }
    }

    /// Latency carried by the record, if the event kind has one
    pub fn latency_ms(&self) -> Option<i64> {
        match self {
            TelemetryRecord::Acquired(_) => None,
            TelemetryRecord::Error(r) => Some(r.latency_ms),
            TelemetryRecord::Authenticated(r) => Some(r.latency_ms),
            TelemetryRecord::Enrolled(r) => Some(r.latency_ms),
        }
    }
}

impl From<AcquiredRecord> for TelemetryRecord {
    fn from(record: AcquiredRecord) -> Self {
        TelemetryRecord::Acquired(record)
    }
}

impl From<ErrorRecord> for TelemetryRecord {
    fn from(record: ErrorRecord) -> Self {
        TelemetryRecord::Error(record)
    }
}

impl From<AuthenticatedRecord> for TelemetryRecord {
    fn from(record: AuthenticatedRecord) -> Self {
        TelemetryRecord::Authenticated(record)
    }
}

impl From<EnrolledRecord> for TelemetryRecord {
    fn from(record: EnrolledRecord) -> Self {
        TelemetryRecord::Enrolled(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_regardless_of_flags() {
        for require_confirmation in [false, true] {
            for is_prompt in [false, true] {
                assert_eq!(
                    AuthenticationState::derive(false, require_confirmation, is_prompt),
                    AuthenticationState::Rejected
                );
            }
        }
    }

    #[test]
    fn test_pending_only_for_prompt_with_confirmation() {
        assert_eq!(
            AuthenticationState::derive(true, true, true),
            AuthenticationState::PendingConfirmation
        );
        assert_eq!(
            AuthenticationState::derive(true, true, false),
            AuthenticationState::Confirmed
        );
        assert_eq!(
            AuthenticationState::derive(true, false, true),
            AuthenticationState::Confirmed
        );
        assert_eq!(
            AuthenticationState::derive(true, false, false),
            AuthenticationState::Confirmed
        );
    }

    #[test]
    fn test_derive_never_yields_unknown() {
        for a in [false, true] {
            for r in [false, true] {
                for p in [false, true] {
                    assert_ne!(
                        AuthenticationState::derive(a, r, p),
                        AuthenticationState::Unknown
                    );
                }
            }
        }
    }

    #[test]
    fn test_record_tagging() {
        let record = TelemetryRecord::from(EnrolledRecord {
            modality: Modality::Fingerprint,
            subject: SubjectId::new(0),
            latency_ms: 1200,
            success: true,
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["event"], "enrolled");
        assert_eq!(json["modality"], "fingerprint");
        assert_eq!(json["latency_ms"], 1200);
        assert_eq!(record.event(), "enrolled");
        assert_eq!(record.latency_ms(), Some(1200));
    }

    #[test]
    fn test_acquired_has_no_latency() {
        let record = TelemetryRecord::from(AcquiredRecord {
            modality: Modality::Face,
            subject: SubjectId::new(10),
            is_crypto: false,
            action: Action::Authenticate,
            client: ClientCategory::Keyguard,
            acquired_info: AcquiredInfo::FACE_START,
            vendor_code: VendorCode::new(0),
            debug_enabled: false,
        });
        assert_eq!(record.latency_ms(), None);
        assert_eq!(record.modality(), Modality::Face);
    }

    #[test]
    fn test_authenticated_json_shape() {
        let record = TelemetryRecord::from(AuthenticatedRecord {
            modality: Modality::Face,
            subject: SubjectId::new(0),
            is_crypto: true,
            client: ClientCategory::BiometricPrompt,
            require_confirmation: true,
            state: AuthenticationState::PendingConfirmation,
            latency_ms: 480,
            debug_enabled: false,
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["event"], "authenticated");
        assert_eq!(json["state"], "pending_confirmation");
        assert_eq!(json["client"], "biometric_prompt");
        assert_eq!(json["is_crypto"], true);

        let back: TelemetryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
