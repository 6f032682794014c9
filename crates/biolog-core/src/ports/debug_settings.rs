//! Debug-mode lookup port
//!
//! Whether diagnostic/debug mode is on for a subject is decided outside
//! BioLog (developer options, per-profile settings). The recorder copies the
//! answer into outbound records and does not interpret it.

use std::collections::HashSet;

use crate::config::DebugConfig;
use crate::domain::SubjectId;

/// Per-subject debug-mode query
pub trait IDebugSettings: Send + Sync {
    fn is_debug_enabled(&self, subject: SubjectId) -> bool;
}

/// Debug settings fixed at construction time
#[derive(Debug, Clone, Default)]
pub struct StaticDebugSettings {
    all_subjects: bool,
    subjects: HashSet<SubjectId>,
}

impl StaticDebugSettings {
    /// Debug mode off for everyone
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Debug mode on for every subject
    pub fn enabled_for_all() -> Self {
        Self {
            all_subjects: true,
            subjects: HashSet::new(),
        }
    }

    /// Debug mode on for the listed subjects only
    pub fn enabled_for(subjects: impl IntoIterator<Item = SubjectId>) -> Self {
        Self {
            all_subjects: false,
            subjects: subjects.into_iter().collect(),
        }
    }

    /// Builds settings from the `debug` configuration section
    pub fn from_config(config: &DebugConfig) -> Self {
        if config.all_subjects {
            Self::enabled_for_all()
        } else {
            Self::enabled_for(config.subjects.iter().copied().map(SubjectId::new))
        }
    }
}

impl IDebugSettings for StaticDebugSettings {
    fn is_debug_enabled(&self, subject: SubjectId) -> bool {
        self.all_subjects || self.subjects.contains(&subject)
    }
}
