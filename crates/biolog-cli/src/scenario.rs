//! Scripted operation attempts for `biolog replay`
//!
//! A scenario names the classification of one attempt and lists the
//! lifecycle events it goes through, each stamped with an offset from the
//! start of the attempt:
//!
//! ```yaml
//! modality: face
//! action: authenticate
//! client: biometric_prompt
//! crypto_operation: true
//! steps:
//!   - event: acquired
//!     at_ms: 0
//!     acquired_info: 20
//!   - event: authenticated
//!     at_ms: 560
//!     authenticated: true
//!     require_confirmation: true
//!     prompt: true
//! ```
//!
//! Omitted classification fields stay `unknown`, which suppresses all
//! structured telemetry for the attempt.

use std::path::Path;

use anyhow::{Context, Result};
use biolog_core::{
    domain::{
        AcquiredInfo, Action, Classification, ClientCategory, ErrorCode, Modality, SubjectId,
        VendorCode, NO_LATENCY,
    },
    ports::ManualClock,
    usecases::OperationRecorder,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default wall-clock origin of a replayed attempt (2023-11-14T22:13:20Z)
pub const DEFAULT_START_MS: i64 = 1_700_000_000_000;

fn default_start_ms() -> i64 {
    DEFAULT_START_MS
}

fn no_latency() -> i64 {
    NO_LATENCY
}

/// One scripted operation attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub action: Action,
    #[serde(default)]
    pub client: ClientCategory,
    #[serde(default)]
    pub crypto_operation: bool,
    /// Clock value at offset 0, in epoch milliseconds
    #[serde(default = "default_start_ms")]
    pub start_ms: i64,
    pub steps: Vec<ScenarioStep>,
}

/// A lifecycle event at a given offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScenarioStep {
    Acquired {
        at_ms: i64,
        acquired_info: AcquiredInfo,
        #[serde(default)]
        vendor_code: VendorCode,
        #[serde(default)]
        subject: SubjectId,
    },
    Error {
        at_ms: i64,
        error: ErrorCode,
        #[serde(default)]
        vendor_code: VendorCode,
        #[serde(default)]
        subject: SubjectId,
    },
    Authenticated {
        at_ms: i64,
        authenticated: bool,
        #[serde(default)]
        require_confirmation: bool,
        #[serde(default)]
        subject: SubjectId,
        #[serde(default)]
        prompt: bool,
    },
    Enrolled {
        at_ms: i64,
        #[serde(default)]
        subject: SubjectId,
        /// Duration measured by the enrollment flow itself
        #[serde(default = "no_latency")]
        latency_ms: i64,
        success: bool,
    },
}

impl ScenarioStep {
    pub fn at_ms(&self) -> i64 {
        match self {
            ScenarioStep::Acquired { at_ms, .. }
            | ScenarioStep::Error { at_ms, .. }
            | ScenarioStep::Authenticated { at_ms, .. }
            | ScenarioStep::Enrolled { at_ms, .. } => *at_ms,
        }
    }
}

impl Scenario {
    /// Loads and checks a scenario file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))?;
        scenario.check_steps()?;
        Ok(scenario)
    }

    /// Step offsets must be non-negative, must not go backwards, and must
    /// keep `start_ms + at_ms` within the clock's range.
    pub fn check_steps(&self) -> Result<()> {
        let mut previous = 0;
        for (index, step) in self.steps.iter().enumerate() {
            let at_ms = step.at_ms();
            if at_ms < previous {
                anyhow::bail!(
                    "step {} at {} ms is earlier than the previous step ({} ms)",
                    index + 1,
                    at_ms,
                    previous
                );
            }
            if self.start_ms.checked_add(at_ms).is_none() {
                anyhow::bail!(
                    "step {} at {} ms overflows the clock when added to start_ms {}",
                    index + 1,
                    at_ms,
                    self.start_ms
                );
            }
            previous = at_ms;
        }
        Ok(())
    }

    pub fn classification(&self) -> Classification {
        Classification::new(self.modality, self.action, self.client)
    }

    /// Drives `recorder` through every step, moving `clock` to each step's
    /// offset before the call.
    pub fn replay(&self, recorder: &mut OperationRecorder, clock: &ManualClock) {
        for step in &self.steps {
            clock.set(self.start_ms.saturating_add(step.at_ms()));
            debug!(at_ms = step.at_ms(), "Replaying step");
            match *step {
                ScenarioStep::Acquired {
                    acquired_info,
                    vendor_code,
                    subject,
                    ..
                } => recorder.report_acquired(acquired_info, vendor_code, subject),
                ScenarioStep::Error {
                    error,
                    vendor_code,
                    subject,
                    ..
                } => recorder.report_error(error, vendor_code, subject),
                ScenarioStep::Authenticated {
                    authenticated,
                    require_confirmation,
                    subject,
                    prompt,
                    ..
                } => recorder.report_authenticated(
                    authenticated,
                    require_confirmation,
                    subject,
                    prompt,
                ),
                ScenarioStep::Enrolled {
                    subject,
                    latency_ms,
                    success,
                    ..
                } => recorder.report_enrolled(subject, latency_ms, success),
            }
        }
    }
}
