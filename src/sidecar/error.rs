//! Sidecar-specific error types
//!
//! Every variant carries the path of the sidecar file involved so that log
//! lines and CLI messages can point at the offending file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing sidecar files
#[derive(Debug, Error)]
pub enum SidecarError {
    /// Reading, writing or creating directories failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sidecar could not be parsed or serialized as JSON
    #[error("Invalid sidecar JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SidecarError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
