//! Sidecar record types

use serde::{Deserialize, Serialize};

/// User-editable metadata stored next to a wildcard
///
/// Keys on disk are exactly `description`, `activation text`,
/// `negative text` and `notes`. Missing keys load as empty strings, except
/// `activation text`, whose absence is kept so callers can fall back to the
/// wrapped identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarRecord {
    #[serde(default)]
    pub description: String,

    #[serde(
        rename = "activation text",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub activation_text: Option<String>,

    #[serde(rename = "negative text", default)]
    pub negative_text: String,

    #[serde(default)]
    pub notes: String,
}

impl SidecarRecord {
    /// Record written the first time a wildcard is seen
    #[must_use]
    pub fn with_activation(activation_text: String) -> Self {
        Self {
            activation_text: Some(activation_text),
            ..Self::default()
        }
    }

    /// Activation text, or `fallback` when the sidecar does not define one
    #[must_use]
    pub fn activation_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.activation_text.as_deref().unwrap_or(fallback)
    }

    /// Apply an edit on top of this record, returning the merged result
    #[must_use]
    pub fn merged(&self, edit: &RecordEdit) -> Self {
        Self {
            description: edit.description.clone().unwrap_or_else(|| self.description.clone()),
            activation_text: edit
                .activation_text
                .clone()
                .or_else(|| self.activation_text.clone()),
            negative_text: edit
                .negative_text
                .clone()
                .unwrap_or_else(|| self.negative_text.clone()),
            notes: edit.notes.clone().unwrap_or_else(|| self.notes.clone()),
        }
    }
}

/// Field-level edit coming from a metadata editor
///
/// `None` leaves the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordEdit {
    pub description: Option<String>,
    pub activation_text: Option<String>,
    pub negative_text: Option<String>,
    pub notes: Option<String>,
}

impl RecordEdit {
    /// An edit that sets all four fields, as a full editor form submits
    #[must_use]
    pub fn full(description: &str, activation_text: &str, negative_text: &str, notes: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            activation_text: Some(activation_text.to_string()),
            negative_text: Some(negative_text.to_string()),
            notes: Some(notes.to_string()),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.activation_text.is_none()
            && self.negative_text.is_none()
            && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_uses_spaced_keys() {
        let json = r#"{"description":"d","activation text":"__a__","negative text":"n","notes":"x"}"#;
        let record: SidecarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.description, "d");
        assert_eq!(record.activation_text.as_deref(), Some("__a__"));
        assert_eq!(record.negative_text, "n");
        assert_eq!(record.notes, "x");
    }

    #[test]
    fn test_missing_keys_default() {
        let record: SidecarRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, SidecarRecord::default());
        assert_eq!(record.activation_or("__fallback__"), "__fallback__");
    }

    #[test]
    fn test_serialize_key_order() {
        let record = SidecarRecord::with_activation("__a__".into());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"description":"","activation text":"__a__","negative text":"","notes":""}"#
        );
    }

    #[test]
    fn test_merged_only_touches_set_fields() {
        let base = SidecarRecord {
            description: "old".into(),
            activation_text: Some("__a__".into()),
            negative_text: "neg".into(),
            notes: "keep".into(),
        };
        let edit = RecordEdit {
            description: Some("new".into()),
            negative_text: Some(String::new()),
            ..RecordEdit::default()
        };
        let merged = base.merged(&edit);
        assert_eq!(merged.description, "new");
        assert_eq!(merged.activation_text.as_deref(), Some("__a__"));
        assert_eq!(merged.negative_text, "");
        assert_eq!(merged.notes, "keep");
    }

    #[test]
    fn test_full_edit_replaces_everything() {
        let merged = SidecarRecord::default().merged(&RecordEdit::full("d", "a", "n", "x"));
        assert_eq!(merged.activation_text.as_deref(), Some("a"));
        assert_eq!(merged.notes, "x");
        assert!(!RecordEdit::full("", "", "", "").is_empty());
        assert!(RecordEdit::default().is_empty());
    }
}
