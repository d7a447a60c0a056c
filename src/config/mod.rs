//! Configuration module for wildcat
//!
//! Holds the wildcard roots, the activation delimiter and the location of
//! the records tree. Configuration is stored in the user's config directory
//! and can be overridden per key with `WILDCAT_*` environment variables.

mod setup;

pub use setup::first_time_setup;

use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::reconcile::BACKUP_DIR_NAME;
use crate::wildcards::{discover_extension_roots, existing_dirs};

/// Name of the records directory under the base directory
pub const RECORDS_DIR_NAME: &str = "Prompts";

/// Default activation-text delimiter
pub const DEFAULT_WILDCARD_WRAP: &str = "__";

/// Default image format used to guess a preview filename
pub const DEFAULT_SAMPLES_FORMAT: &str = "png";

fn default_wildcard_wrap() -> String {
    DEFAULT_WILDCARD_WRAP.to_string()
}

fn default_samples_format() -> String {
    DEFAULT_SAMPLES_FORMAT.to_string()
}

fn default_base_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wildcat")
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WildcatConfig {
    /// Directories scanned for wildcard files
    #[serde(default)]
    pub wildcard_dirs: Vec<PathBuf>,

    /// Delimiter wrapped around an identifier to form its activation text
    #[serde(default = "default_wildcard_wrap")]
    pub wildcard_wrap: String,

    /// Image format hint for the default preview filename
    #[serde(default = "default_samples_format")]
    pub samples_format: String,

    /// Directory owning the records tree and the backup tree
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Host extensions directory searched for `*/wildcards` when no
    /// configured root is usable
    #[serde(default)]
    pub extensions_dir: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for WildcatConfig {
    fn default() -> Self {
        Self {
            wildcard_dirs: Vec::new(),
            wildcard_wrap: default_wildcard_wrap(),
            samples_format: default_samples_format(),
            base_dir: default_base_dir(),
            extensions_dir: None,
            quiet: false,
        }
    }
}

impl WildcatConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("wildcat").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file. A missing file yields defaults.
    ///
    /// Environment variables prefixed with `WILDCAT_` override file values;
    /// `WILDCAT_WILDCARD_DIRS` takes a comma-separated list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("WILDCAT")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("wildcard_dirs"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load only what is stored in `path`, ignoring `WILDCAT_` variables.
    ///
    /// Used before writing the file back so environment overrides are not
    /// persisted. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()?
            .try_deserialize()
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            first_time_setup()
        }
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config path cannot be determined or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Parse a newline-separated list of directories, as entered in a
    /// settings text box. Blank lines are dropped.
    #[must_use]
    pub fn parse_wildcard_dirs(value: &str) -> Vec<PathBuf> {
        value
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    /// Directory holding one sidecar per wildcard
    #[must_use]
    pub fn records_root(&self) -> PathBuf {
        self.base_dir.join(RECORDS_DIR_NAME)
    }

    /// Directory receiving quarantined files
    #[must_use]
    pub fn backup_root(&self) -> PathBuf {
        self.base_dir.join(BACKUP_DIR_NAME)
    }

    /// Wildcard roots to enumerate.
    ///
    /// Configured directories that do not exist are dropped. When none is
    /// left, `*/wildcards` directories under `extensions_dir` are used instead.
    #[must_use]
    pub fn wildcard_roots(&self) -> Vec<PathBuf> {
        let roots = existing_dirs(&self.wildcard_dirs);
        if !roots.is_empty() {
            return roots;
        }
        match &self.extensions_dir {
            Some(extensions_dir) => {
                let discovered = discover_extension_roots(extensions_dir);
                if !discovered.is_empty() {
                    tracing::info!(count = discovered.len(), "using wildcard directories found in extensions");
                }
                discovered
            }
            None => roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = WildcatConfig::default();
        assert!(config.wildcard_dirs.is_empty());
        assert_eq!(config.wildcard_wrap, "__");
        assert_eq!(config.samples_format, "png");
        assert!(config.extensions_dir.is_none());
        assert!(!config.quiet);
    }

    #[test]
    fn test_layout_under_base_dir() {
        let config = WildcatConfig {
            base_dir: PathBuf::from("/data/wildcat"),
            ..WildcatConfig::default()
        };
        assert_eq!(config.records_root(), PathBuf::from("/data/wildcat/Prompts"));
        assert_eq!(config.backup_root(), PathBuf::from("/data/wildcat/_tmp_bak_"));
    }

    #[test]
    fn test_parse_wildcard_dirs() {
        let dirs = WildcatConfig::parse_wildcard_dirs("/a/wildcards\n\n  /b/more  \n");
        assert_eq!(dirs, vec![PathBuf::from("/a/wildcards"), PathBuf::from("/b/more")]);
        assert!(WildcatConfig::parse_wildcard_dirs("").is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = WildcatConfig {
            wildcard_dirs: vec![PathBuf::from("/w1"), PathBuf::from("/w2")],
            wildcard_wrap: "~~".into(),
            samples_format: "webp".into(),
            base_dir: dir.path().to_path_buf(),
            extensions_dir: Some(PathBuf::from("/ext")),
            quiet: true,
        };

        config.save_to(&path).unwrap();
        let loaded = WildcatConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "wildcard_wrap = \"%%\"\n").unwrap();

        let loaded = WildcatConfig::load_from(&path).unwrap();
        assert_eq!(loaded.wildcard_wrap, "%%");
        assert_eq!(loaded.samples_format, "png");
        assert!(loaded.wildcard_dirs.is_empty());
    }

    #[test]
    fn test_wildcard_roots_skip_missing() {
        let dir = TempDir::new().unwrap();
        let config = WildcatConfig {
            wildcard_dirs: vec![dir.path().join("missing"), dir.path().to_path_buf()],
            ..WildcatConfig::default()
        };
        assert_eq!(config.wildcard_roots(), vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn test_wildcard_roots_fall_back_to_extensions() {
        let dir = TempDir::new().unwrap();
        let ext_wildcards = dir.path().join("ext").join("some-extension").join("wildcards");
        fs::create_dir_all(&ext_wildcards).unwrap();

        let config = WildcatConfig {
            wildcard_dirs: vec![dir.path().join("missing")],
            extensions_dir: Some(dir.path().join("ext")),
            ..WildcatConfig::default()
        };
        assert_eq!(config.wildcard_roots(), vec![ext_wildcards]);
    }

    #[test]
    fn test_wildcard_roots_empty_without_fallback() {
        let config = WildcatConfig::default();
        assert!(config.wildcard_roots().is_empty());
    }
}
