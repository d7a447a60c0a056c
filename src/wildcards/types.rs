//! Wildcard identifier type

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EnumerateError;

/// Logical path of a wildcard, segments joined by `/`
///
/// Identifiers are always normalized: no empty segments, no leading or
/// trailing separator. Case is preserved; comparisons against the records
/// tree during reconciliation go through [`WildcardId::comparison_key`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WildcardId(String);

impl WildcardId {
    /// Build an identifier from a `/`-separated string.
    ///
    /// Returns `None` when no non-empty segment remains or when any segment
    /// is `.` or `..`, which would not map to a path under the records root.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let segments: Vec<&str> = raw.split('/').filter(|segment| !segment.is_empty()).collect();
        if segments.is_empty() || segments.iter().any(|segment| is_relative_marker(segment)) {
            return None;
        }
        Some(Self(segments.join("/")))
    }

    /// Build an identifier from a path relative to some root, with any
    /// extension already stripped by the caller.
    #[must_use]
    pub fn from_relative_path(path: &Path) -> Option<Self> {
        let segments: Vec<String> = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().replace('\\', "/")),
                _ => None,
            })
            .collect();
        Self::new(&segments.join("/"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// The final path segment
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The second-to-last segment, or an empty string for single-segment ids
    #[must_use]
    pub fn category(&self) -> &str {
        let mut parts = self.0.rsplit('/');
        parts.next();
        parts.next().unwrap_or("")
    }

    /// Case-folded form used to match files in the records tree
    #[must_use]
    pub fn comparison_key(&self) -> String {
        self.0.to_uppercase()
    }

    /// The identifier as a relative filesystem path
    #[must_use]
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }

    /// Wrap the identifier in the activation delimiter, e.g. `__colors/warm__`
    #[must_use]
    pub fn wrapped(&self, delimiter: &str) -> String {
        format!("{delimiter}{}{delimiter}", self.0)
    }
}

fn is_relative_marker(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

impl fmt::Display for WildcardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WildcardId {
    type Err = EnumerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| EnumerateError::InvalidIdentifier(s.to_string()))
    }
}

impl TryFrom<String> for WildcardId {
    type Error = EnumerateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WildcardId> for String {
    fn from(id: WildcardId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_separators() {
        let id = WildcardId::new("/colors//warm/").unwrap();
        assert_eq!(id.as_str(), "colors/warm");
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(WildcardId::new("").is_none());
        assert!(WildcardId::new("///").is_none());
    }

    #[test]
    fn test_new_rejects_dot_segments() {
        assert!(WildcardId::new("..").is_none());
        assert!(WildcardId::new("../../escaped").is_none());
        assert!(WildcardId::new("a/./b").is_none());
        assert!(WildcardId::new("a/..").is_none());
        assert!("../x".parse::<WildcardId>().is_err());
        assert_eq!(WildcardId::new("a/.hidden/..b").unwrap().as_str(), "a/.hidden/..b");
    }

    #[test]
    fn test_segments_and_category() {
        let id = WildcardId::new("styles/art/Baroque").unwrap();
        assert_eq!(id.segments().count(), 3);
        assert_eq!(id.last_segment(), "Baroque");
        assert_eq!(id.category(), "art");

        let top = WildcardId::new("animals").unwrap();
        assert_eq!(top.last_segment(), "animals");
        assert_eq!(top.category(), "");
    }

    #[test]
    fn test_from_relative_path() {
        let path = Path::new("styles").join("art").join("baroque");
        let id = WildcardId::from_relative_path(&path).unwrap();
        assert_eq!(id.as_str(), "styles/art/baroque");
    }

    #[test]
    fn test_comparison_key_folds_case() {
        let id = WildcardId::new("Styles/Art").unwrap();
        assert_eq!(id.comparison_key(), "STYLES/ART");
    }

    #[test]
    fn test_wrapped() {
        let id = WildcardId::new("colors/warm").unwrap();
        assert_eq!(id.wrapped("__"), "__colors/warm__");
    }

    #[test]
    fn test_parse_invalid() {
        let err = "/".parse::<WildcardId>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid wildcard identifier: '/'");
    }

    #[test]
    fn test_serde_transparent_string() {
        let id = WildcardId::new("a/b").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a/b\"");
        let back: WildcardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
