//! Config command - read and change settings in the configuration file

use std::path::{Path, PathBuf};

use crate::{WildcatError, cli::ConfigCommands, config::WildcatConfig};

type Result<T> = std::result::Result<T, WildcatError>;

const AVAILABLE_KEYS: &str =
    "wildcard_dirs, wildcard_wrap, samples_format, base_dir, extensions_dir, quiet";

/// Execute the config command
///
/// `config` is the effective configuration shown by `get`. `set` re-reads
/// `path` without environment overrides, applies the change and writes it back.
///
/// # Errors
/// Returns an error if the key is unknown, the value cannot be parsed, or the
/// configuration cannot be read or saved
pub fn execute(
    config: &WildcatConfig,
    path: &Path,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                WildcatError::InvalidInput("Invalid format. Use: wildcat config set key=value".into())
            })?;
            let key = key.trim();
            let mut stored = WildcatConfig::load_file(path)?;
            apply_setting(&mut stored, key, value.trim())?;
            stored.save_to(path)?;
            tracing::info!(key, path = %path.display(), "configuration updated");
            if !quiet {
                println!("Set {key} = {}", get_setting(&stored, key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", get_setting(config, key.trim())?);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Apply one `key=value` setting to `config`
///
/// `wildcard_dirs` takes a comma- or newline-separated list; an empty
/// `extensions_dir` clears it.
///
/// # Errors
/// Returns `InvalidInput` for an unknown key or an unparsable value
pub fn apply_setting(config: &mut WildcatConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "wildcard_dirs" => {
            config.wildcard_dirs = WildcatConfig::parse_wildcard_dirs(&value.replace(',', "\n"));
        }
        "wildcard_wrap" => config.wildcard_wrap = value.to_string(),
        "samples_format" => {
            if value.is_empty() {
                return Err(WildcatError::InvalidInput("samples_format cannot be empty".into()));
            }
            config.samples_format = value.trim_start_matches('.').to_string();
        }
        "base_dir" => {
            if value.is_empty() {
                return Err(WildcatError::InvalidInput("base_dir cannot be empty".into()));
            }
            config.base_dir = PathBuf::from(value);
        }
        "extensions_dir" => {
            config.extensions_dir = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        "quiet" => {
            config.quiet = value.parse::<bool>().map_err(|_| {
                WildcatError::InvalidInput(format!(
                    "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                ))
            })?;
        }
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

/// Render the current value of `key`
///
/// # Errors
/// Returns `InvalidInput` for an unknown key
pub fn get_setting(config: &WildcatConfig, key: &str) -> Result<String> {
    let value = match key {
        "wildcard_dirs" => config
            .wildcard_dirs
            .iter()
            .map(|dir| dir.display().to_string())
            .collect::<Vec<_>>()
            .join(","),
        "wildcard_wrap" => config.wildcard_wrap.clone(),
        "samples_format" => config.samples_format.clone(),
        "base_dir" => config.base_dir.display().to_string(),
        "extensions_dir" => config
            .extensions_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default(),
        "quiet" => config.quiet.to_string(),
        _ => return Err(unknown_key(key)),
    };
    Ok(value)
}

fn unknown_key(key: &str) -> WildcatError {
    WildcatError::InvalidInput(format!(
        "Unknown configuration key: '{key}'. Available keys: {AVAILABLE_KEYS}"
    ))
}
