//! Testing utilities for wildcat
//!
//! Provides a `TestWorkspace` fixture: a temporary directory holding a
//! wildcard root and a data directory, plus a configuration pointing at them.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::catalog::CatalogService;
use crate::config::WildcatConfig;

/// Temporary wildcard root and data directory, removed on drop
///
/// # Examples
/// ```ignore
/// let ws = TestWorkspace::new();
/// ws.wildcard("colors/warm.txt", "red\n");
/// let mut catalog = ws.catalog();
/// assert_eq!(catalog.refresh(), 1);
/// ```
pub struct TestWorkspace {
    dir: TempDir,
    config: WildcatConfig,
}

impl TestWorkspace {
    /// Create an empty workspace
    ///
    /// # Panics
    /// Panics if the temporary directories cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let wildcards = dir.path().join("wildcards");
        fs::create_dir_all(&wildcards).expect("Failed to create wildcard root");

        let config = WildcatConfig {
            wildcard_dirs: vec![wildcards],
            base_dir: dir.path().join("data"),
            ..WildcatConfig::default()
        };

        Self { dir, config }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn config(&self) -> &WildcatConfig {
        &self.config
    }

    #[must_use]
    pub fn wildcards_dir(&self) -> PathBuf {
        self.dir.path().join("wildcards")
    }

    #[must_use]
    pub fn records_dir(&self) -> PathBuf {
        self.config.records_root()
    }

    /// Write a wildcard definition file relative to the wildcard root
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn wildcard(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.wildcards_dir().join(rel), content.as_bytes())
    }

    /// Write an arbitrary file relative to the records root
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn record_file(&self, rel: &str, content: &[u8]) -> PathBuf {
        write_file(&self.records_dir().join(rel), content)
    }

    /// A catalog service over this workspace
    #[must_use]
    pub fn catalog(&self) -> CatalogService {
        CatalogService::from_config(&self.config)
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, content: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write test file");
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_layout() {
        let ws = TestWorkspace::new();
        assert!(ws.wildcards_dir().is_dir());
        assert_eq!(ws.records_dir(), ws.path().join("data").join("Prompts"));
        assert_eq!(ws.config().wildcard_roots(), vec![ws.wildcards_dir()]);
    }

    #[test]
    fn test_workspace_cleanup() {
        let path = {
            let ws = TestWorkspace::new();
            ws.wildcard("a.txt", "x");
            ws.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_record_file_creates_parents() {
        let ws = TestWorkspace::new();
        let path = ws.record_file("deep/dir/file.json", b"{}");
        assert_eq!(fs::read(path).unwrap(), b"{}");
    }
}
