//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when wildcat is run for the first time.

use super::WildcatConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for the wildcard and data directories
///
/// 1. Prompts for the wildcard directories (comma-separated, may be left empty)
/// 2. Prompts for the data directory holding the records and backup trees
/// 3. Creates and saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup() -> Result<WildcatConfig, ConfigError> {
    println!("Welcome to wildcat! Let's point it at your wildcards.\n");

    let mut config = WildcatConfig::default();

    let wildcard_dirs: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Wildcard directories (comma-separated)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let base_dir: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Data directory")
        .default(config.base_dir.to_string_lossy().to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    config.wildcard_dirs = WildcatConfig::parse_wildcard_dirs(&wildcard_dirs.replace(',', "\n"));
    config.base_dir = PathBuf::from(base_dir);

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
