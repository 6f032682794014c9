//! Replay command - Drive a recorder through a scripted attempt
//!
//! Loads a scenario, feeds its steps to one `OperationRecorder` on a manual
//! clock and prints what reached the sinks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use biolog_core::{
    config::Config,
    domain::{Action, ClientCategory, Modality, TelemetryRecord},
    ports::ManualClock,
    usecases::{OperationRecorder, TelemetryContext},
};
use biolog_telemetry::{FanoutSink, MemorySink, PrometheusMetricsSink, RecordLogSink};
use clap::Args;
use tracing::info;

use super::load_effective_config;
use crate::output::{get_formatter, OutputFormat};
use crate::scenario::Scenario;

/// Arguments for `biolog replay`
#[derive(Debug, Args)]
pub struct ReplayCommand {
    /// Scenario file (YAML)
    pub scenario: PathBuf,

    /// Print the Prometheus exposition text after the records
    #[arg(long)]
    pub metrics: bool,

    /// Override the scenario's modality
    #[arg(long)]
    pub modality: Option<Modality>,

    /// Override the scenario's action
    #[arg(long)]
    pub action: Option<Action>,

    /// Override the scenario's client category
    #[arg(long)]
    pub client: Option<ClientCategory>,
}

/// What a replay produced
pub struct ReplayOutcome {
    pub scenario: Scenario,
    pub records: Vec<TelemetryRecord>,
    pub metrics_text: String,
    pub record_log: Option<PathBuf>,
}

impl ReplayCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let config = load_effective_config(config_path)?;
        let mut scenario = Scenario::load(&self.scenario).await?;
        self.apply_overrides(&mut scenario);

        info!(
            scenario = %self.scenario.display(),
            classification = %scenario.classification(),
            steps = scenario.steps.len(),
            "Replaying scenario"
        );

        let outcome = run_replay(scenario, &config)?;
        self.print(&outcome, format);
        Ok(())
    }

    fn apply_overrides(&self, scenario: &mut Scenario) {
        if let Some(modality) = self.modality {
            scenario.modality = modality;
        }
        if let Some(action) = self.action {
            scenario.action = action;
        }
        if let Some(client) = self.client {
            scenario.client = client;
        }
    }

    fn print(&self, outcome: &ReplayOutcome, format: OutputFormat) {
        let formatter = get_formatter(format);
        let classification = outcome.scenario.classification();
        let suppressed = classification.is_any_field_unknown();

        if format.is_json() {
            let mut json = serde_json::json!({
                "classification": classification.to_string(),
                "crypto_operation": outcome.scenario.crypto_operation,
                "steps": outcome.scenario.steps.len(),
                "suppressed": suppressed,
                "records": outcome.records,
            });
            if self.metrics {
                json["metrics"] = serde_json::Value::String(outcome.metrics_text.clone());
            }
            if let Some(path) = &outcome.record_log {
                json["record_log"] = serde_json::Value::String(path.display().to_string());
            }
            formatter.print_json(&json);
            return;
        }

        formatter.success(&format!(
            "Replayed {} step{} for {}",
            outcome.scenario.steps.len(),
            if outcome.scenario.steps.len() == 1 { "" } else { "s" },
            classification
        ));
        if suppressed {
            formatter.warn("Classification has an unknown field; no records were emitted");
        }
        formatter.info(&format!("{} record(s) emitted", outcome.records.len()));
        for (index, record) in outcome.records.iter().enumerate() {
            formatter.record(index, record);
        }
        if let Some(path) = &outcome.record_log {
            formatter.info(&format!("Appended to {}", path.display()));
        }
        if self.metrics {
            formatter.info("");
            for line in outcome.metrics_text.lines() {
                formatter.info(line);
            }
        }
    }
}

/// Runs `scenario` through a fresh recorder wired to the configured sinks.
pub fn run_replay(scenario: Scenario, config: &Config) -> Result<ReplayOutcome> {
    scenario.check_steps()?;

    let metrics = Arc::new(
        PrometheusMetricsSink::new(&config.telemetry)
            .context("Failed to create Prometheus metrics")?,
    );
    let memory = Arc::new(MemorySink::new());
    let mut fanout = FanoutSink::new()
        .with_sink(metrics.clone())
        .with_sink(memory.clone());

    let clock = Arc::new(ManualClock::new(scenario.start_ms));

    let record_log = match &config.telemetry.record_log {
        Some(path) => {
            let sink = RecordLogSink::open(path)
                .with_context(|| format!("Failed to open record log {}", path.display()))?
                .with_clock(clock.clone());
            fanout = fanout.with_sink(Arc::new(sink));
            Some(path.clone())
        }
        None => None,
    };

    let context = TelemetryContext::from_config(config, Arc::new(fanout)).with_clock(clock.clone());
    let mut recorder = OperationRecorder::new(context, scenario.classification())
        .with_crypto_operation(scenario.crypto_operation);

    scenario.replay(&mut recorder, &clock);

    Ok(ReplayOutcome {
        records: memory.records(),
        metrics_text: metrics.encode()?,
        record_log,
        scenario,
    })
}

#[cfg(test)]
mod tests {
    use biolog_core::config::ConfigBuilder;
    use tempfile::TempDir;

    use super::*;

    const FINGERPRINT_ERROR: &str = r#"
modality: fingerprint
action: authenticate
client: keyguard
steps:
  - event: acquired
    at_ms: 0
    acquired_info: 7
    subject: 11
  - event: error
    at_ms: 250
    error: 5
    subject: 11
"#;

    fn scenario() -> Scenario {
        serde_yaml::from_str(FINGERPRINT_ERROR).unwrap()
    }

    #[test]
    fn test_replay_records_and_metrics() {
        let outcome = run_replay(scenario(), &Config::default()).unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[1].latency_ms(), Some(250));
        let errors_line = outcome
            .metrics_text
            .lines()
            .find(|l| l.starts_with("biolog_errors_total{"))
            .unwrap();
        assert!(errors_line.contains("error=\"5\""));
        assert!(errors_line.ends_with(" 1"));
        assert!(outcome.record_log.is_none());
    }

    #[test]
    fn test_replay_uses_configured_namespace_and_debug_subjects() {
        let config = ConfigBuilder::new()
            .telemetry_namespace("keyguard_lab")
            .debug_subjects(vec![11])
            .build();
        let outcome = run_replay(scenario(), &config).unwrap();

        assert!(outcome.metrics_text.contains("keyguard_lab_acquired_total"));
        match &outcome.records[0] {
            TelemetryRecord::Acquired(record) => assert!(record.debug_enabled),
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn test_replay_appends_record_log() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("out").join("records.jsonl");
        let config = ConfigBuilder::new()
            .telemetry_record_log(log.clone())
            .build();

        let outcome = run_replay(scenario(), &config).unwrap();

        assert_eq!(outcome.record_log.as_deref(), Some(log.as_path()));
        let content = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        // Timestamps follow the scenario clock, not the wall clock
        assert_eq!(lines[0]["timestamp"], "2023-11-14T22:13:20+00:00");
        assert_eq!(lines[1]["timestamp"], "2023-11-14T22:13:20.250+00:00");
    }

    #[test]
    fn test_client_override_suppresses_records() {
        let command = ReplayCommand {
            scenario: PathBuf::from("unused.yaml"),
            metrics: false,
            modality: None,
            action: None,
            client: Some(ClientCategory::Unknown),
        };
        let mut scenario = scenario();
        command.apply_overrides(&mut scenario);

        let outcome = run_replay(scenario, &Config::default()).unwrap();
        assert!(outcome.records.is_empty());
        assert!(!outcome.metrics_text.contains("errors_total{"));
    }

    #[test]
    fn test_replay_rejects_offset_overflowing_clock() {
        let mut scenario = scenario();
        scenario.start_ms = i64::MAX;

        let result = run_replay(scenario, &Config::default());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_execute_end_to_end() {
        let dir = TempDir::new().unwrap();
        let scenario_path = dir.path().join("attempt.yaml");
        std::fs::write(&scenario_path, FINGERPRINT_ERROR).unwrap();

        let command = ReplayCommand {
            scenario: scenario_path,
            metrics: true,
            modality: None,
            action: None,
            client: None,
        };
        let result = command
            .execute(OutputFormat::Json, &dir.path().join("missing-config.yaml"))
            .await;
        assert!(result.is_ok());
    }
}
