//! Catalog error types

use thiserror::Error;

use crate::sidecar::SidecarError;
use crate::wildcards::WildcardId;

/// Errors returned to callers editing the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The wildcard is not part of the current live set
    #[error("Unknown wildcard: '{0}'")]
    UnknownWildcard(WildcardId),

    /// The sidecar could not be written
    #[error("Sidecar error: {0}")]
    Sidecar(#[from] SidecarError),
}
