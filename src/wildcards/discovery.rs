//! Wildcard root resolution

use std::path::{Path, PathBuf};

/// Keep only the paths that are existing directories, dropping duplicates.
#[must_use]
pub fn existing_dirs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for path in paths {
        if path.is_dir() && !dirs.contains(path) {
            dirs.push(path.clone());
        }
    }
    dirs
}

/// Find `wildcards/` directories shipped by host extensions.
///
/// Looks for `<extensions_dir>/*/wildcards`. Used as a fallback when no
/// configured wildcard root is usable.
#[must_use]
pub fn discover_extension_roots(extensions_dir: &Path) -> Vec<PathBuf> {
    let base = glob::Pattern::escape(&extensions_dir.to_string_lossy());
    let pattern = format!("{base}/*/wildcards");

    let paths = match glob::glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "invalid extension discovery pattern");
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "failed to inspect extension directory");
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_existing_dirs_filters_and_dedups() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().to_path_buf();
        let missing = dir.path().join("missing");
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let dirs = existing_dirs(&[present.clone(), missing, file, present.clone()]);
        assert_eq!(dirs, vec![present]);
    }

    #[test]
    fn test_discover_extension_roots() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("ext-b/wildcards")).unwrap();
        fs::create_dir_all(dir.path().join("ext-a/wildcards")).unwrap();
        fs::create_dir_all(dir.path().join("ext-c/other")).unwrap();
        fs::create_dir_all(dir.path().join("ext-d")).unwrap();
        fs::write(dir.path().join("ext-d/wildcards"), "not a dir").unwrap();

        let roots = discover_extension_roots(dir.path());
        assert_eq!(
            roots,
            vec![
                dir.path().join("ext-a/wildcards"),
                dir.path().join("ext-b/wildcards"),
            ]
        );
    }

    #[test]
    fn test_discover_extension_roots_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(discover_extension_roots(&dir.path().join("nope")).is_empty());
    }
}
