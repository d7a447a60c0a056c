//! Wildcard discovery
//!
//! Walks the configured wildcard roots and produces the live set of
//! wildcard identifiers. Two file families contribute identifiers:
//!
//! - **List files** (`.txt`): one identifier per file, taken from the path
//!   relative to its root with the extension stripped.
//! - **Structured files** (`.yaml`/`.yml`): one identifier per leaf key-path
//!   of the nested mapping.
//!
//! Everything else inside a wildcard root is ignored.

pub mod discovery;
pub mod enumerate;
pub mod error;
pub mod types;

pub use discovery::{discover_extension_roots, existing_dirs};
pub use enumerate::{WildcardEnumerator, WildcardFileKind};
pub use error::EnumerateError;
pub use types::WildcardId;
