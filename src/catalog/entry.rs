//! Gallery-ready catalog entries

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::names::ResolvedName;
use crate::sidecar::{SidecarRecord, SidecarStore, find_preview};
use crate::wildcards::WildcardId;

/// Number of hex digits kept for an entry's short hash
pub const SHORT_HASH_LEN: usize = 10;

/// Sort keys exposed to the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKeys {
    /// `<category>-<display name>`, lowercased
    pub default: String,
    /// Display name, lowercased
    pub name: String,
}

/// Which sort key to order entries by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Default,
    Name,
}

/// One browsable item, rebuilt on every refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: WildcardId,
    pub name: String,
    pub category: String,
    /// Sidecar file backing this entry
    pub filename: PathBuf,
    pub shorthash: String,
    /// Existing preview image inside the records root
    pub preview: Option<PathBuf>,
    /// Where a newly saved preview would be written
    pub local_preview: PathBuf,
    pub description: String,
    pub search_terms: Vec<String>,
    /// Activation text, quoted for embedding in a script
    pub prompt: String,
    /// Negative text, quoted for embedding in a script
    pub negative_prompt: String,
    pub sort_keys: SortKeys,
    pub record: SidecarRecord,
}

impl CatalogEntry {
    /// Assemble the entry for `id` from its resolved name and sidecar record.
    ///
    /// Without a resolved name the last path segment is used and the
    /// category is left empty.
    #[must_use]
    pub fn build(
        id: &WildcardId,
        resolved: Option<&ResolvedName>,
        record: &SidecarRecord,
        store: &SidecarStore,
        samples_format: &str,
    ) -> Self {
        let (name, category) = resolved.map_or_else(
            || (id.last_segment().to_string(), String::new()),
            |r| (r.display_name.clone(), r.category.clone()),
        );

        let filename = store.path_for(id);
        let base = store.base_path_for(id);
        let wrapped = id.wrapped(store.wrap());

        let mut local_preview = base.clone().into_os_string();
        local_preview.push(format!(".{samples_format}"));

        Self {
            id: id.clone(),
            shorthash: short_hash(&filename),
            preview: find_preview(&base, store.root()),
            local_preview: PathBuf::from(local_preview),
            description: record.description.clone(),
            search_terms: vec![search_terms_from_path(&filename, store.root())],
            prompt: quote_js(record.activation_or(&wrapped)),
            negative_prompt: quote_js(&record.negative_text),
            sort_keys: SortKeys {
                default: format!("{}-{}", category.to_lowercase(), name.to_lowercase()),
                name: name.to_lowercase(),
            },
            filename,
            name,
            category,
            record: record.clone(),
        }
    }

    #[must_use]
    pub fn sort_key(&self, key: SortKey) -> &str {
        match key {
            SortKey::Default => &self.sort_keys.default,
            SortKey::Name => &self.sort_keys.name,
        }
    }
}

/// Order entries by `key`, ties broken by identifier
pub fn sort_entries(entries: &mut [CatalogEntry], key: SortKey) {
    entries.sort_by(|a, b| a.sort_key(key).cmp(b.sort_key(key)).then_with(|| a.id.cmp(&b.id)));
}

/// Stable short hash of a sidecar path: the trailing hex digits of its SHA-256
#[must_use]
pub fn short_hash(path: &Path) -> String {
    let digest = hex::encode(Sha256::digest(path.to_string_lossy().as_bytes()));
    digest[digest.len() - SHORT_HASH_LEN..].to_string()
}

/// Search term for a sidecar: its path relative to the records root's parent
#[must_use]
pub fn search_terms_from_path(path: &Path, records_root: &Path) -> String {
    let anchor = records_root.parent().unwrap_or(records_root);
    path.strip_prefix(anchor)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Quote a string for safe embedding inside a double-quoted JS literal
#[must_use]
pub fn quote_js(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
