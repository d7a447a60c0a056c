//! Wildcard enumeration over one or more roots

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use walkdir::WalkDir;

use super::error::EnumerateError;
use super::types::WildcardId;

/// Extensions of flat list files (one identifier per file)
pub const LIST_EXTENSIONS: &[&str] = &["txt"];

/// Extensions of structured files (one identifier per leaf key-path)
pub const STRUCTURED_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Kind of wildcard definition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardFileKind {
    List,
    Structured,
}

impl WildcardFileKind {
    /// Classify a file by its extension (case-insensitive)
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if LIST_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::List)
        } else if STRUCTURED_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Structured)
        } else {
            None
        }
    }
}

/// Produces the live set of wildcard identifiers from a set of roots
#[derive(Debug, Clone, Default)]
pub struct WildcardEnumerator {
    roots: Vec<PathBuf>,
}

impl WildcardEnumerator {
    #[must_use]
    pub const fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Enumerate every wildcard under every root.
    ///
    /// Roots that are not existing directories are skipped. Unreadable
    /// entries and malformed structured files are logged and contribute
    /// nothing; enumeration of the remaining files continues.
    #[must_use]
    pub fn collect(&self) -> BTreeSet<WildcardId> {
        let mut found = BTreeSet::new();

        if self.roots.is_empty() {
            tracing::warn!("Wildcard directories are not set up yet");
            return found;
        }

        for root in &self.roots {
            if !root.is_dir() {
                tracing::debug!(root = %root.display(), "skipping missing wildcard root");
                continue;
            }
            collect_root(root, &mut found);
        }

        found
    }
}

fn collect_root(root: &Path, found: &mut BTreeSet<WildcardId>) {
    let walker = WalkDir::new(root).sort_by_file_name().into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "failed to walk wildcard directory");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match WildcardFileKind::from_path(path) {
            Some(WildcardFileKind::List) => {
                if let Some(id) = list_file_identifier(root, path) {
                    found.insert(id);
                }
            }
            Some(WildcardFileKind::Structured) => match structured_identifiers(path) {
                Ok(ids) => found.extend(ids),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "skipping structured wildcard file");
                }
            },
            None => {}
        }
    }
}

/// Identifier of a list file: its path relative to `root`, extension stripped
#[must_use]
pub fn list_file_identifier(root: &Path, path: &Path) -> Option<WildcardId> {
    let relative = path.strip_prefix(root).ok()?;
    WildcardId::from_relative_path(&relative.with_extension(""))
}

/// Read a structured file and return one identifier per leaf key-path.
///
/// # Errors
///
/// Returns `EnumerateError::Io` if the file cannot be read and
/// `EnumerateError::Yaml` if it is not valid YAML.
pub fn structured_identifiers(path: &Path) -> Result<BTreeSet<WildcardId>, EnumerateError> {
    let source = fs::read_to_string(path).map_err(|source| EnumerateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    structured_identifiers_from_str(&source).map_err(|source| EnumerateError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse YAML text and return one identifier per leaf key-path.
///
/// # Errors
///
/// Returns the parser error if `source` is not valid YAML.
pub fn structured_identifiers_from_str(
    source: &str,
) -> Result<BTreeSet<WildcardId>, serde_yaml::Error> {
    let document: Value = serde_yaml::from_str(source)?;
    let mut found = BTreeSet::new();
    let mut prefix = Vec::new();
    traverse(&document, &mut prefix, &mut found);
    Ok(found)
}

// Recurses into mappings; the first non-mapping value ends a key-path.
fn traverse(value: &Value, prefix: &mut Vec<String>, found: &mut BTreeSet<WildcardId>) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(segment) = key_segment(key) else {
                    tracing::debug!(key = ?key, "ignoring non-scalar mapping key");
                    continue;
                };
                prefix.push(segment);
                traverse(child, prefix, found);
                prefix.pop();
            }
        }
        Value::Tagged(tagged) => traverse(&tagged.value, prefix, found),
        _ if prefix.is_empty() => {}
        _ => match WildcardId::new(&prefix.join("/")) {
            Some(id) => {
                found.insert(id);
            }
            None => {
                tracing::warn!(key_path = %prefix.join("/"), "ignoring key path with '.' or '..' segments");
            }
        },
    }
}

fn key_segment(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ids(values: &[&str]) -> BTreeSet<WildcardId> {
        values.iter().map(|v| WildcardId::new(v).unwrap()).collect()
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_file_kind_is_case_insensitive() {
        assert_eq!(WildcardFileKind::from_path(Path::new("a/B.TXT")), Some(WildcardFileKind::List));
        assert_eq!(WildcardFileKind::from_path(Path::new("c.Yml")), Some(WildcardFileKind::Structured));
        assert_eq!(WildcardFileKind::from_path(Path::new("d.yaml")), Some(WildcardFileKind::Structured));
        assert_eq!(WildcardFileKind::from_path(Path::new("e.json")), None);
        assert_eq!(WildcardFileKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_structured_traversal_emits_leaf_paths() {
        let found = structured_identifiers_from_str("a:\n  b: 1\n  c:\n    d: 2\n").unwrap();
        assert_eq!(found, ids(&["a/b", "a/c/d"]));
    }

    #[test]
    fn test_structured_traversal_stops_at_lists() {
        let yaml = "styles:\n  warm:\n    - red\n    - orange\n  cold: [blue]\n";
        let found = structured_identifiers_from_str(yaml).unwrap();
        assert_eq!(found, ids(&["styles/cold", "styles/warm"]));
    }

    #[test]
    fn test_structured_empty_mapping_contributes_nothing() {
        let found = structured_identifiers_from_str("a: {}\n").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_structured_scalar_document_contributes_nothing() {
        let found = structured_identifiers_from_str("just text").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_structured_numeric_keys() {
        let found = structured_identifiers_from_str("years:\n  1999: x\n").unwrap();
        assert_eq!(found, ids(&["years/1999"]));
    }

    #[test]
    fn test_structured_dot_keys_are_dropped() {
        let found = structured_identifiers_from_str("..:\n  ..:\n    escaped: x\n").unwrap();
        assert!(found.is_empty());

        let found = structured_identifiers_from_str("a:\n  .: x\n  b: y\n").unwrap();
        assert_eq!(found, ids(&["a/b"]));
    }

    #[test]
    fn test_collect_list_and_structured_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "animals.txt", "cat\ndog\n");
        write(dir.path(), "styles/art/Baroque.TXT", "ornate\n");
        write(dir.path(), "nested.yaml", "colors:\n  warm: [red]\n");
        write(dir.path(), "readme.md", "ignored");

        let enumerator = WildcardEnumerator::new(vec![dir.path().to_path_buf()]);
        assert_eq!(
            enumerator.collect(),
            ids(&["animals", "colors/warm", "styles/art/Baroque"])
        );
    }

    #[test]
    fn test_collect_skips_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "broken.yaml", "a: [unclosed\n");
        write(dir.path(), "good.txt", "x");

        let enumerator = WildcardEnumerator::new(vec![dir.path().to_path_buf()]);
        assert_eq!(enumerator.collect(), ids(&["good"]));
    }

    #[test]
    fn test_collect_merges_roots_and_skips_missing() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write(first.path(), "shared.txt", "a");
        write(second.path(), "shared.txt", "b");
        write(second.path(), "only_second.txt", "c");

        let enumerator = WildcardEnumerator::new(vec![
            first.path().to_path_buf(),
            first.path().join("does-not-exist"),
            second.path().to_path_buf(),
        ]);
        assert_eq!(enumerator.collect(), ids(&["only_second", "shared"]));
    }

    #[test]
    fn test_collect_without_roots_is_empty() {
        assert!(WildcardEnumerator::default().collect().is_empty());
    }

    #[test]
    fn test_structured_identifiers_reports_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.yml", "key: [\n");
        let err = structured_identifiers(&dir.path().join("bad.yml")).unwrap_err();
        assert!(matches!(err, EnumerateError::Yaml { .. }));
        assert!(err.to_string().contains("bad.yml"));
    }
}
