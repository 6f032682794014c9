//! Domain newtypes
//!
//! Strongly-typed wrappers for the integer codes that flow through the
//! recorder. The values are opaque to BioLog; the wrappers only keep a
//! subject id from being passed where an error code is expected.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

// ============================================================================
// SubjectId
// ============================================================================

/// The user or profile an attempt belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(i32);

impl SubjectId {
    /// Wraps a raw subject id
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the inner value
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl Display for SubjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for SubjectId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

// ============================================================================
// AcquiredInfo
// ============================================================================

/// Acquisition signal kind reported by the sensor HAL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcquiredInfo(i32);

impl AcquiredInfo {
    /// Generic "good signal" marker, shared by all modalities
    pub const GOOD: Self = Self(0);
    /// Fingerprint start-of-acquisition marker
    pub const FINGERPRINT_START: Self = Self(7);
    /// Face start-of-acquisition marker
    pub const FACE_START: Self = Self(20);

    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl Display for AcquiredInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AcquiredInfo {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

// ============================================================================
// ErrorCode / VendorCode
// ============================================================================

/// Error kind reported by the sensor HAL or framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(i32);

impl ErrorCode {
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// Opaque vendor-specific detail attached to signals and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorCode(i32);

impl VendorCode {
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl Display for VendorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for VendorCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}
