//! Sidecar metadata storage
//!
//! Every live wildcard owns exactly one JSON sidecar under the records root,
//! at a path mirroring its identifier: `colors/warm` lives at
//! `<records>/colors/warm.json`. Preview images sit next to the sidecar.
//!
//! The store creates missing sidecars with defaults, loads the sidecars of
//! live wildcards, and writes edits back. It never removes sidecars; stale
//! files are the reconciler's business.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::wildcards::WildcardId;

pub mod error;
pub mod preview;
pub mod record;

pub use error::SidecarError;
pub use preview::{IMAGE_EXTENSIONS, PREVIEW_INFIX, find_preview, is_image_extension};
pub use record::{RecordEdit, SidecarRecord};

/// Extension of sidecar files
pub const SIDECAR_EXTENSION: &str = "json";

/// Sidecar files rooted at a records directory
#[derive(Debug, Clone)]
pub struct SidecarStore {
    root: PathBuf,
    wrap: String,
}

impl SidecarStore {
    /// Create a store over `root`, using `wrap` as the activation delimiter
    pub fn new(root: impl Into<PathBuf>, wrap: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            wrap: wrap.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn wrap(&self) -> &str {
        &self.wrap
    }

    /// Path of the sidecar without its extension; previews hang off this
    #[must_use]
    pub fn base_path_for(&self, id: &WildcardId) -> PathBuf {
        let relative = id.to_relative_path();
        debug_assert!(
            relative.components().all(|c| matches!(c, Component::Normal(_))),
            "sidecar path for {id} escapes the records root"
        );
        self.root.join(relative)
    }

    /// Path of the sidecar file for `id`
    #[must_use]
    pub fn path_for(&self, id: &WildcardId) -> PathBuf {
        let mut path = self.base_path_for(id).into_os_string();
        path.push(".");
        path.push(SIDECAR_EXTENSION);
        PathBuf::from(path)
    }

    /// Identifier a sidecar file under the root belongs to
    #[must_use]
    pub fn identifier_for(&self, path: &Path) -> Option<WildcardId> {
        if path.extension()? != SIDECAR_EXTENSION {
            return None;
        }
        let relative = path.strip_prefix(&self.root).ok()?;
        WildcardId::from_relative_path(&relative.with_extension(""))
    }

    /// Default record for a wildcard that has never been seen before
    #[must_use]
    pub fn default_record(&self, id: &WildcardId) -> SidecarRecord {
        SidecarRecord::with_activation(id.wrapped(&self.wrap))
    }

    /// Make sure a sidecar exists for `id`.
    ///
    /// Returns the default record when a new sidecar was written and `None`
    /// when one already existed or the write failed. Failures are logged.
    pub fn ensure(&self, id: &WildcardId) -> Option<SidecarRecord> {
        match self.try_ensure(id) {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(wildcard = %id, error = %e, "failed to create sidecar");
                None
            }
        }
    }

    fn try_ensure(&self, id: &WildcardId) -> Result<Option<SidecarRecord>, SidecarError> {
        let path = self.path_for(id);
        create_parent_dirs(&path)?;

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(None),
            Err(e) => return Err(SidecarError::io(&path, e)),
        };

        let record = self.default_record(id);
        write_json(file, &path, &record)?;
        tracing::debug!(wildcard = %id, path = %path.display(), "created sidecar");
        Ok(Some(record))
    }

    /// Ensure sidecars for every identifier, returning how many were created
    pub fn ensure_all<'a>(&self, ids: impl IntoIterator<Item = &'a WildcardId>) -> usize {
        ids.into_iter().filter_map(|id| self.ensure(id)).count()
    }

    /// Read the sidecar for `id`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns `SidecarError::Io` if the file exists but cannot be read and
    /// `SidecarError::Json` if it cannot be parsed.
    pub fn load(&self, id: &WildcardId) -> Result<Option<SidecarRecord>, SidecarError> {
        let path = self.path_for(id);
        match fs::read_to_string(&path) {
            Ok(text) => parse_record(&path, &text).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SidecarError::io(&path, e)),
        }
    }

    /// Load every sidecar under the root whose identifier is in `live`.
    ///
    /// A sidecar that cannot be read or parsed is logged and replaced with an
    /// empty record, so every live wildcard with a file still gets an entry.
    #[must_use]
    pub fn load_all(&self, live: &BTreeSet<WildcardId>) -> BTreeMap<WildcardId, SidecarRecord> {
        let mut records = BTreeMap::new();

        if !self.root.is_dir() {
            tracing::debug!(root = %self.root.display(), "records directory does not exist");
            return records;
        }

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to walk records directory");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let Some(id) = self.identifier_for(path) else {
                continue;
            };
            if !live.contains(&id) {
                continue;
            }

            let record = fs::read_to_string(path)
                .map_err(|e| SidecarError::io(path, e))
                .and_then(|text| parse_record(path, &text))
                .unwrap_or_else(|e| {
                    tracing::warn!(wildcard = %id, error = %e, "failed to load sidecar");
                    SidecarRecord::default()
                });
            records.insert(id, record);
        }

        records
    }

    /// Overwrite the sidecar for `id` with `record`.
    ///
    /// # Errors
    ///
    /// Returns `SidecarError` if the directory cannot be created, or the file
    /// cannot be serialized or written.
    pub fn save(&self, id: &WildcardId, record: &SidecarRecord) -> Result<(), SidecarError> {
        let path = self.path_for(id);
        create_parent_dirs(&path)?;
        let file = fs::File::create(&path).map_err(|e| SidecarError::io(&path, e))?;
        write_json(file, &path, record)
    }
}

fn create_parent_dirs(path: &Path) -> Result<(), SidecarError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SidecarError::io(parent, e))?;
    }
    Ok(())
}

fn parse_record(path: &Path, text: &str) -> Result<SidecarRecord, SidecarError> {
    serde_json::from_str(text).map_err(|e| SidecarError::json(path, e))
}

// Four-space indentation, keys in declaration order.
fn write_json(mut file: fs::File, path: &Path, record: &SidecarRecord) -> Result<(), SidecarError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record
        .serialize(&mut serializer)
        .map_err(|e| SidecarError::json(path, e))?;
    file.write_all(&buf).map_err(|e| SidecarError::io(path, e))
}
