//! CLI subcommands

pub mod config;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use biolog_core::config::Config;

/// Loads the configuration used to run a command.
///
/// A missing file means defaults; a file that fails to parse or validate
/// is an error.
pub fn load_effective_config(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        Config::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?
    } else {
        Config::default()
    };

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!(
            "Invalid configuration {}: {}",
            path.display(),
            messages.join("; ")
        );
    }
    Ok(config)
}
