//! Errors raised while reading wildcard definition files

use std::path::PathBuf;
use thiserror::Error;

/// Failures that can occur while enumerating wildcards
///
/// The enumerator never propagates these past a single file; they are
/// logged and the offending file contributes no identifiers.
#[derive(Debug, Error)]
pub enum EnumerateError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The structured file is not valid YAML
    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A string could not be turned into a wildcard identifier
    #[error("Invalid wildcard identifier: '{0}'")]
    InvalidIdentifier(String),
}
