//! Wildcat - a sidecar metadata catalog for prompt wildcards
//!
//! This library discovers wildcard definition files, keeps one JSON sidecar
//! of user metadata per wildcard, presents them as catalog entries, and
//! quarantines sidecars and previews that no longer belong to a wildcard.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod names;
pub mod output;
pub mod reconcile;
pub mod sidecar;
pub mod wildcards;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum WildcatError {
    /// Catalog error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Sidecar error
    #[error("Sidecar error: {0}")]
    SidecarError(#[from] sidecar::SidecarError),
    /// Wildcard enumeration or identifier error
    #[error("Wildcard error: {0}")]
    WildcardError(#[from] wildcards::EnumerateError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents a JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
