//! Wildcard catalog
//!
//! Ties the pieces together: each refresh enumerates the wildcard roots,
//! resolves display names, creates any missing sidecars, loads the sidecars
//! of live wildcards, and publishes the result as a new snapshot. Readers
//! holding the previous snapshot keep seeing it unchanged.
//!
//! The stale-asset sweep is only run on request through
//! [`CatalogService::clean_stale_assets`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use crate::config::WildcatConfig;
use crate::names::{NameTable, resolve_names};
use crate::reconcile::{AssetReconciler, SweepReport};
use crate::sidecar::{RecordEdit, SidecarRecord, SidecarStore};
use crate::wildcards::{WildcardEnumerator, WildcardId};

pub mod entry;
pub mod error;
pub mod provider;

pub use entry::{CatalogEntry, SortKey, SortKeys, quote_js, sort_entries};
pub use error::CatalogError;
pub use provider::CatalogProvider;

/// Result of one refresh
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub names: NameTable,
    pub records: BTreeMap<WildcardId, SidecarRecord>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Owns the catalog state and its refresh lifecycle
#[derive(Debug)]
pub struct CatalogService {
    enumerator: WildcardEnumerator,
    store: SidecarStore,
    reconciler: AssetReconciler,
    samples_format: String,
    snapshot: Arc<CatalogSnapshot>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        enumerator: WildcardEnumerator,
        store: SidecarStore,
        reconciler: AssetReconciler,
        samples_format: impl Into<String>,
    ) -> Self {
        Self {
            enumerator,
            store,
            reconciler,
            samples_format: samples_format.into(),
            snapshot: Arc::default(),
        }
    }

    /// Build a service from configuration. The snapshot starts empty.
    #[must_use]
    pub fn from_config(config: &WildcatConfig) -> Self {
        Self::new(
            WildcardEnumerator::new(config.wildcard_roots()),
            SidecarStore::new(config.records_root(), config.wildcard_wrap.clone()),
            AssetReconciler::new(config.records_root(), config.backup_root()),
            config.samples_format.clone(),
        )
    }

    #[must_use]
    pub fn store(&self) -> &SidecarStore {
        &self.store
    }

    #[must_use]
    pub fn roots(&self) -> &[std::path::PathBuf] {
        self.enumerator.roots()
    }

    /// Directories previews may be served from
    #[must_use]
    pub fn allowed_preview_dirs(&self) -> Vec<&Path> {
        vec![self.store.root()]
    }

    /// Current snapshot; stays valid across later refreshes
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Rebuild the catalog from disk and return the number of live wildcards.
    pub fn refresh(&mut self) -> usize {
        let live = self.enumerator.collect();
        let names = resolve_names(&live);

        let created = self.store.ensure_all(&live);
        if created > 0 {
            tracing::info!(created, "created default sidecars");
        }

        let records = self.store.load_all(&live);
        self.snapshot = Arc::new(CatalogSnapshot { names, records });
        live.len()
    }

    /// Entries of the current snapshot ordered by `key`, ties broken by id
    #[must_use]
    pub fn entries_sorted_by(&self, key: SortKey) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .snapshot
            .records
            .iter()
            .map(|(id, record)| self.build_entry(id, record))
            .collect();
        sort_entries(&mut entries, key);
        entries
    }

    /// Entries of the current snapshot in default order
    #[must_use]
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.entries_sorted_by(SortKey::Default)
    }

    #[must_use]
    pub fn entry(&self, id: &WildcardId) -> Option<CatalogEntry> {
        self.snapshot
            .records
            .get(id)
            .map(|record| self.build_entry(id, record))
    }

    #[must_use]
    pub fn record(&self, id: &WildcardId) -> Option<&SidecarRecord> {
        self.snapshot.records.get(id)
    }

    /// Read-modify-write of a live wildcard's record.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownWildcard` if `id` is not in the current
    /// snapshot and `CatalogError::Sidecar` if the write fails.
    pub fn update_record(&mut self, id: &WildcardId, edit: &RecordEdit) -> Result<SidecarRecord, CatalogError> {
        let current = self
            .snapshot
            .records
            .get(id)
            .ok_or_else(|| CatalogError::UnknownWildcard(id.clone()))?;

        let merged = current.merged(edit);
        self.store.save(id, &merged)?;

        Arc::make_mut(&mut self.snapshot)
            .records
            .insert(id.clone(), merged.clone());
        Ok(merged)
    }

    /// Sweep the records tree against a freshly enumerated live set.
    ///
    /// Does not touch the current snapshot.
    pub fn clean_stale_assets(&self) -> SweepReport {
        let live: BTreeSet<WildcardId> = self.enumerator.collect();
        let report = self.reconciler.sweep(&live);
        tracing::info!(status = %report.status_message(), "stale asset cleanup finished");
        report
    }

    fn build_entry(&self, id: &WildcardId, record: &SidecarRecord) -> CatalogEntry {
        CatalogEntry::build(
            id,
            self.snapshot.names.get(id),
            record,
            &self.store,
            &self.samples_format,
        )
    }
}

impl CatalogProvider for CatalogService {
    fn list_entries(&mut self) -> Vec<CatalogEntry> {
        self.refresh();
        self.entries()
    }

    fn get_record(&self, id: &WildcardId) -> Option<SidecarRecord> {
        self.record(id).cloned()
    }

    fn save_record(&mut self, id: &WildcardId, edit: &RecordEdit) -> Result<SidecarRecord, CatalogError> {
        self.update_record(id, edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestWorkspace;
    use std::fs;

    fn id(value: &str) -> WildcardId {
        WildcardId::new(value).unwrap()
    }

    #[test]
    fn test_refresh_creates_and_loads_sidecars() {
        let ws = TestWorkspace::new();
        ws.wildcard("colors/warm.txt", "red\n");
        ws.wildcard("moods/warm.txt", "cozy\n");
        ws.wildcard("nested.yaml", "scenes:\n  night: [moon]\n");

        let mut catalog = ws.catalog();
        assert_eq!(catalog.refresh(), 3);

        for name in ["colors/warm", "moods/warm", "scenes/night"] {
            assert!(catalog.store().path_for(&id(name)).is_file());
        }
        assert_eq!(catalog.snapshot().len(), 3);
    }

    #[test]
    fn test_entries_sorted_by_category_then_name() {
        let ws = TestWorkspace::new();
        ws.wildcard("b/Zebra.txt", "");
        ws.wildcard("a/yak.txt", "");
        ws.wildcard("top.txt", "");

        let mut catalog = ws.catalog();
        catalog.refresh();

        let order: Vec<_> = catalog.entries().into_iter().map(|e| e.id.to_string()).collect();
        assert_eq!(order, vec!["top", "a/yak", "b/Zebra"]);

        let by_name: Vec<_> = catalog
            .entries_sorted_by(SortKey::Name)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(by_name, vec!["top", "yak", "Zebra"]);
    }

    #[test]
    fn test_previous_snapshot_survives_refresh() {
        let ws = TestWorkspace::new();
        ws.wildcard("one.txt", "");

        let mut catalog = ws.catalog();
        catalog.refresh();
        let before = catalog.snapshot();

        ws.wildcard("two.txt", "");
        catalog.refresh();

        assert_eq!(before.len(), 1);
        assert_eq!(catalog.snapshot().len(), 2);
    }

    #[test]
    fn test_update_record_merges_and_persists() {
        let ws = TestWorkspace::new();
        ws.wildcard("animals.txt", "cat");

        let mut catalog = ws.catalog();
        catalog.refresh();

        let edit = RecordEdit {
            description: Some("Animals".into()),
            notes: Some("from the zoo".into()),
            ..RecordEdit::default()
        };
        let saved = catalog.update_record(&id("animals"), &edit).unwrap();
        assert_eq!(saved.activation_text.as_deref(), Some("__animals__"));
        assert_eq!(saved.description, "Animals");

        catalog.refresh();
        assert_eq!(catalog.record(&id("animals")), Some(&saved));
    }

    #[test]
    fn test_update_unknown_wildcard() {
        let ws = TestWorkspace::new();
        let mut catalog = ws.catalog();
        catalog.refresh();

        let err = catalog.update_record(&id("ghost"), &RecordEdit::default()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownWildcard(_)));
    }

    #[test]
    fn test_provider_interface() {
        let ws = TestWorkspace::new();
        ws.wildcard("a.txt", "");

        let mut catalog = ws.catalog();
        let provider: &mut dyn CatalogProvider = &mut catalog;
        let entries = provider.list_entries();
        assert_eq!(entries.len(), 1);

        provider
            .save_record(&id("a"), &RecordEdit::full("d", "__a__, extra", "n", "x"))
            .unwrap();
        let record = provider.get_record(&id("a")).unwrap();
        assert_eq!(record.activation_text.as_deref(), Some("__a__, extra"));
        assert_eq!(provider.list_entries()[0].prompt, "\"__a__, extra\"");
    }

    #[test]
    fn test_clean_stale_assets_uses_fresh_live_set() {
        let ws = TestWorkspace::new();
        ws.wildcard("keep.txt", "");
        ws.wildcard("drop.txt", "");

        let mut catalog = ws.catalog();
        catalog.refresh();

        fs::remove_file(ws.wildcards_dir().join("drop.txt")).unwrap();
        let report = catalog.clean_stale_assets();

        assert_eq!(report.archived_count(), 1);
        assert!(!catalog.store().path_for(&id("drop")).exists());
        assert!(catalog.store().path_for(&id("keep")).exists());
        assert_eq!(catalog.clean_stale_assets().archived_count(), 0);
    }

    #[test]
    fn test_allowed_preview_dirs_is_records_root() {
        let ws = TestWorkspace::new();
        let catalog = ws.catalog();
        assert_eq!(catalog.allowed_preview_dirs(), vec![ws.config().records_root().as_path()]);
    }
}
