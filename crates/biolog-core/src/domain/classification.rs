//! Operation classification
//!
//! Every attempt is classified once, when its recorder is created, by the
//! sensor modality, the high-level action, and the category of the calling
//! client. Each axis has an `Unknown` variant; a classification containing
//! any `Unknown` closes the telemetry gate for the whole attempt.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::AcquiredInfo;

// ============================================================================
// Modality
// ============================================================================

/// Biometric sensor category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Not known to the caller
    #[default]
    Unknown,
    /// Fingerprint sensor
    Fingerprint,
    /// Iris scanner
    Iris,
    /// Face camera
    Face,
    /// Any other sensor type
    Other,
}

impl Modality {
    /// Numeric wire code (bit-flag numbering, `Unknown` = 0)
    pub const fn code(self) -> i32 {
        match self {
            Modality::Unknown => 0,
            Modality::Fingerprint => 1,
            Modality::Iris => 2,
            Modality::Face => 4,
            Modality::Other => 8,
        }
    }

    /// Stable snake_case name, used for metric labels
    pub const fn as_str(self) -> &'static str {
        match self {
            Modality::Unknown => "unknown",
            Modality::Fingerprint => "fingerprint",
            Modality::Iris => "iris",
            Modality::Face => "face",
            Modality::Other => "other",
        }
    }

    /// Returns true if `info` marks the first usable signal of an attempt
    /// for this modality.
    ///
    /// Face and fingerprint sensors report a dedicated start-of-acquisition
    /// code; every other modality uses the generic good-signal code.
    pub fn is_first_signal(self, info: AcquiredInfo) -> bool {
        match self {
            Modality::Fingerprint => info == AcquiredInfo::FINGERPRINT_START,
            Modality::Face => info == AcquiredInfo::FACE_START,
            _ => info == AcquiredInfo::GOOD,
        }
    }
}

impl Display for Modality {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Modality::Unknown),
            "fingerprint" => Ok(Modality::Fingerprint),
            "iris" => Ok(Modality::Iris),
            "face" => Ok(Modality::Face),
            "other" => Ok(Modality::Other),
            _ => Err(DomainError::UnknownVariant {
                kind: "modality",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Action
// ============================================================================

/// High-level action an attempt performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Unknown,
    Enroll,
    Authenticate,
    Enumerate,
    Remove,
}

impl Action {
    /// Numeric wire code (`Unknown` = 0)
    pub const fn code(self) -> i32 {
        match self {
            Action::Unknown => 0,
            Action::Enroll => 1,
            Action::Authenticate => 2,
            Action::Enumerate => 3,
            Action::Remove => 4,
        }
    }

    /// Stable snake_case name, used for metric labels
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Unknown => "unknown",
            Action::Enroll => "enroll",
            Action::Authenticate => "authenticate",
            Action::Enumerate => "enumerate",
            Action::Remove => "remove",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Action::Unknown),
            "enroll" => Ok(Action::Enroll),
            "authenticate" => Ok(Action::Authenticate),
            "enumerate" => Ok(Action::Enumerate),
            "remove" => Ok(Action::Remove),
            _ => Err(DomainError::UnknownVariant {
                kind: "action",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// ClientCategory
// ============================================================================

/// Category of the calling context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientCategory {
    #[default]
    Unknown,
    /// Lock screen
    Keyguard,
    /// System biometric prompt shown on behalf of an app
    BiometricPrompt,
    /// Settings (enrollment, management)
    Settings,
    /// Direct use of the platform manager API
    ManagerApi,
}

impl ClientCategory {
    /// Numeric wire code (`Unknown` = 0)
    pub const fn code(self) -> i32 {
        match self {
            ClientCategory::Unknown => 0,
            ClientCategory::Keyguard => 1,
            ClientCategory::BiometricPrompt => 2,
            ClientCategory::Settings => 3,
            ClientCategory::ManagerApi => 4,
        }
    }

    /// Stable snake_case name, used for metric labels
    pub const fn as_str(self) -> &'static str {
        match self {
            ClientCategory::Unknown => "unknown",
            ClientCategory::Keyguard => "keyguard",
            ClientCategory::BiometricPrompt => "biometric_prompt",
            ClientCategory::Settings => "settings",
            ClientCategory::ManagerApi => "manager_api",
        }
    }
}

impl Display for ClientCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(ClientCategory::Unknown),
            "keyguard" => Ok(ClientCategory::Keyguard),
            "biometric_prompt" => Ok(ClientCategory::BiometricPrompt),
            "settings" => Ok(ClientCategory::Settings),
            "manager_api" => Ok(ClientCategory::ManagerApi),
            _ => Err(DomainError::UnknownVariant {
                kind: "client",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Immutable classification of one operation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Classification {
    pub modality: Modality,
    pub action: Action,
    pub client: ClientCategory,
}

impl Classification {
    /// Creates a classification from its three axes
    pub const fn new(modality: Modality, action: Action, client: ClientCategory) -> Self {
        Self {
            modality,
            action,
            client,
        }
    }

    /// Returns true if any axis is `Unknown`.
    ///
    /// Such attempts must not produce structured telemetry.
    pub fn is_any_field_unknown(&self) -> bool {
        self.modality == Modality::Unknown
            || self.action == Action::Unknown
            || self.client == ClientCategory::Unknown
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.modality, self.action, self.client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_gate_per_axis() {
        let known = Classification::new(
            Modality::Face,
            Action::Authenticate,
            ClientCategory::Keyguard,
        );
        assert!(!known.is_any_field_unknown());

        let mut c = known;
        c.modality = Modality::Unknown;
        assert!(c.is_any_field_unknown());

        let mut c = known;
        c.action = Action::Unknown;
        assert!(c.is_any_field_unknown());

        let mut c = known;
        c.client = ClientCategory::Unknown;
        assert!(c.is_any_field_unknown());
    }

    #[test]
    fn test_default_is_fully_unknown() {
        let c = Classification::default();
        assert_eq!(c.modality, Modality::Unknown);
        assert_eq!(c.action, Action::Unknown);
        assert_eq!(c.client, ClientCategory::Unknown);
        assert!(c.is_any_field_unknown());
    }

    #[test]
    fn test_first_signal_markers() {
        assert!(Modality::Fingerprint.is_first_signal(AcquiredInfo::FINGERPRINT_START));
        assert!(!Modality::Fingerprint.is_first_signal(AcquiredInfo::GOOD));
        assert!(!Modality::Fingerprint.is_first_signal(AcquiredInfo::FACE_START));

        assert!(Modality::Face.is_first_signal(AcquiredInfo::FACE_START));
        assert!(!Modality::Face.is_first_signal(AcquiredInfo::GOOD));

        assert!(Modality::Iris.is_first_signal(AcquiredInfo::GOOD));
        assert!(Modality::Other.is_first_signal(AcquiredInfo::GOOD));
        assert!(Modality::Unknown.is_first_signal(AcquiredInfo::GOOD));
        assert!(!Modality::Other.is_first_signal(AcquiredInfo::FINGERPRINT_START));
    }

    #[test]
    fn test_parse_and_display_agree() {
        for m in [
            Modality::Unknown,
            Modality::Fingerprint,
            Modality::Iris,
            Modality::Face,
            Modality::Other,
        ] {
            assert_eq!(m.to_string().parse::<Modality>().unwrap(), m);
        }
        for c in [
            ClientCategory::Keyguard,
            ClientCategory::BiometricPrompt,
            ClientCategory::Settings,
            ClientCategory::ManagerApi,
        ] {
            assert_eq!(c.to_string().parse::<ClientCategory>().unwrap(), c);
        }
        assert_eq!("enroll".parse::<Action>().unwrap(), Action::Enroll);
    }

    #[test]
    fn test_parse_rejects_unrecognized_names() {
        let err = "retina".parse::<Modality>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownVariant {
                kind: "modality",
                value: "retina".to_string()
            }
        );
        assert!("login".parse::<Action>().is_err());
        assert!("Keyguard".parse::<ClientCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let c = Classification::new(
            Modality::Fingerprint,
            Action::Enroll,
            ClientCategory::BiometricPrompt,
        );
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["modality"], "fingerprint");
        assert_eq!(json["action"], "enroll");
        assert_eq!(json["client"], "biometric_prompt");
    }

    #[test]
    fn test_unknown_codes_are_zero() {
        assert_eq!(Modality::Unknown.code(), 0);
        assert_eq!(Action::Unknown.code(), 0);
        assert_eq!(ClientCategory::Unknown.code(), 0);
        assert_eq!(Modality::Face.code(), 4);
    }
}
