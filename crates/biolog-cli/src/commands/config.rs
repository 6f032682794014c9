//! Config command - View and check BioLog configuration
//!
//! Provides the `biolog config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates the configuration file and reports every error found

use std::path::Path;

use anyhow::{Context, Result};
use biolog_core::config::Config;
use clap::Subcommand;
use tracing::info;

use crate::output::{get_formatter, OutputFormat};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(format, config_path),
            ConfigCommand::Validate => {
                let report = validate_file(config_path);
                print_report(&report, config_path, format);
                Ok(())
            }
        }
    }
}

fn execute_show(format: OutputFormat, config_path: &Path) -> Result<()> {
    let formatter = get_formatter(format);
    let config = Config::load_or_default(config_path);

    info!(config_path = %config_path.display(), "Showing configuration");

    if format.is_json() {
        let json =
            serde_json::to_value(&config).context("Failed to serialize configuration to JSON")?;
        formatter.print_json(&json);
    } else {
        formatter.success(&format!("Configuration ({})", config_path.display()));
        if !config_path.exists() {
            formatter.info("(file not found, showing defaults)");
        }
        formatter.info("");

        let yaml =
            serde_yaml::to_string(&config).context("Failed to serialize configuration to YAML")?;
        for line in yaml.lines() {
            formatter.info(line);
        }
    }

    Ok(())
}

/// Outcome of checking a configuration file
#[derive(Debug, PartialEq)]
enum ValidationReport {
    NotFound,
    Unparsable(String),
    Checked(Vec<String>),
}

fn validate_file(config_path: &Path) -> ValidationReport {
    if !config_path.exists() {
        return ValidationReport::NotFound;
    }

    info!(config_path = %config_path.display(), "Validating configuration");

    match Config::load(config_path) {
        Ok(config) => ValidationReport::Checked(
            config.validate().iter().map(|e| e.to_string()).collect(),
        ),
        Err(e) => ValidationReport::Unparsable(e.to_string()),
    }
}

fn print_report(report: &ValidationReport, config_path: &Path, format: OutputFormat) {
    let formatter = get_formatter(format);

    if format.is_json() {
        let (valid, errors) = match report {
            ValidationReport::NotFound => (
                false,
                vec!["Configuration file not found. Using defaults.".to_string()],
            ),
            ValidationReport::Unparsable(e) => {
                (false, vec![format!("Failed to parse configuration: {}", e)])
            }
            ValidationReport::Checked(errors) => (errors.is_empty(), errors.clone()),
        };
        formatter.print_json(&serde_json::json!({
            "valid": valid,
            "config_path": config_path.display().to_string(),
            "errors": errors,
        }));
        return;
    }

    match report {
        ValidationReport::NotFound => {
            formatter.info(&format!(
                "Configuration file not found at {}",
                config_path.display()
            ));
            formatter.info("Using default configuration.");
        }
        ValidationReport::Unparsable(e) => {
            formatter.error(&format!("Failed to parse configuration: {}", e));
            formatter.info(&format!("File: {}", config_path.display()));
        }
        ValidationReport::Checked(errors) if errors.is_empty() => {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", config_path.display()));
        }
        ValidationReport::Checked(errors) => {
            formatter.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            for error in errors {
                formatter.info(&format!("  {}", error));
            }
        }
    }
}
