//! BioLog CLI - Command-line interface for BioLog
//!
//! Provides commands for:
//! - Replaying a scripted operation attempt through a recorder
//! - Viewing and validating configuration

use std::path::PathBuf;

use anyhow::Result;
use biolog_core::config::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod scenario;

use commands::{config::ConfigCommand, replay::ReplayCommand};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "biolog", version, about = "Biometric operation telemetry recorder")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a scripted attempt and show the emitted telemetry
    Replay(ReplayCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    // Setup tracing; the config file level applies when no -v is given
    let filter = match cli.verbose {
        0 => Config::load_or_default(&config_path).logging.level,
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Replay(cmd) => cmd.execute(format, &config_path).await,
        Commands::Config(cmd) => cmd.execute(format, &config_path).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replay_with_overrides() {
        let cli = Cli::try_parse_from([
            "biolog",
            "--json",
            "-vv",
            "replay",
            "attempt.yaml",
            "--metrics",
            "--client",
            "keyguard",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Replay(cmd) => {
                assert_eq!(cmd.scenario, PathBuf::from("attempt.yaml"));
                assert!(cmd.metrics);
                assert_eq!(
                    cmd.client,
                    Some(biolog_core::domain::ClientCategory::Keyguard)
                );
                assert_eq!(cmd.modality, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_modality() {
        let result = Cli::try_parse_from(["biolog", "replay", "a.yaml", "--modality", "retina"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_subcommands() {
        let cli = Cli::try_parse_from(["biolog", "--config", "/tmp/c.yaml", "config", "validate"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommand::Validate)
        ));
    }
}
