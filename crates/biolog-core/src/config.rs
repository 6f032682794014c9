//! Configuration module for BioLog.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for BioLog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub telemetry: TelemetryConfig,
    pub debug: DebugConfig,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Emit every field of every lifecycle event as a diagnostic line,
    /// instead of latencies only.
    pub verbose_events: bool,
}

/// Outbound telemetry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Prefix for all Prometheus metric names.
    pub namespace: String,
    /// Upper bounds (in milliseconds) of the latency histogram buckets.
    pub latency_buckets_ms: Vec<f64>,
    /// Optional JSON-lines file receiving every emitted record.
    pub record_log: Option<PathBuf>,
}

/// Per-subject debug mode, copied into outbound records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Debug mode on for every subject.
    pub all_subjects: bool,
    /// Subjects with debug mode on (ignored when `all_subjects` is set).
    pub subjects: Vec<i32>,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/biolog/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("biolog")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            verbose_events: false,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            namespace: "biolog".to_string(),
            latency_buckets_ms: vec![50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0],
            record_log: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"telemetry.namespace"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Returns true if `name` is a valid Prometheus metric name prefix.
fn is_valid_metric_prefix(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        // --- telemetry ---
        if !is_valid_metric_prefix(&self.telemetry.namespace) {
            errors.push(ValidationError {
                field: "telemetry.namespace".into(),
                message: format!(
                    "invalid namespace '{}'; must match [a-zA-Z_][a-zA-Z0-9_]*",
                    self.telemetry.namespace
                ),
            });
        }

        let buckets = &self.telemetry.latency_buckets_ms;
        if buckets.is_empty() {
            errors.push(ValidationError {
                field: "telemetry.latency_buckets_ms".into(),
                message: "must contain at least one bucket".into(),
            });
        } else if buckets.iter().any(|b| !b.is_finite() || *b <= 0.0) {
            errors.push(ValidationError {
                field: "telemetry.latency_buckets_ms".into(),
                message: "buckets must be finite and greater than 0".into(),
            });
        } else if buckets.windows(2).any(|w| w[0] >= w[1]) {
            errors.push(ValidationError {
                field: "telemetry.latency_buckets_ms".into(),
                message: "buckets must be strictly increasing".into(),
            });
        }

        if let Some(path) = &self.telemetry.record_log {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError {
                    field: "telemetry.record_log".into(),
                    message: "path must not be empty".into(),
                });
            }
        }

        // --- debug ---
        if self.debug.all_subjects && !self.debug.subjects.is_empty() {
            errors.push(ValidationError {
                field: "debug.subjects".into(),
                message: "must be empty when debug.all_subjects is true".into(),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use biolog_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .telemetry_namespace("keyguard")
///     .logging_verbose_events(true)
///     .debug_subjects(vec![0])
///     .build();
/// assert!(config.validate().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn logging_verbose_events(mut self, verbose: bool) -> Self {
        self.config.logging.verbose_events = verbose;
        self
    }

    // --- telemetry ---

    pub fn telemetry_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.telemetry.namespace = namespace.into();
        self
    }

    pub fn telemetry_latency_buckets_ms(mut self, buckets: Vec<f64>) -> Self {
        self.config.telemetry.latency_buckets_ms = buckets;
        self
    }

    pub fn telemetry_record_log(mut self, path: PathBuf) -> Self {
        self.config.telemetry.record_log = Some(path);
        self
    }

    // --- debug ---

    pub fn debug_all_subjects(mut self, all: bool) -> Self {
        self.config.debug.all_subjects = all;
        self
    }

    pub fn debug_subjects(mut self, subjects: Vec<i32>) -> Self {
        self.config.debug.subjects = subjects;
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
