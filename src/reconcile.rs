//! Stale asset housekeeping for the records tree
//!
//! The sweep moves every file under the records root that is not a sidecar
//! or preview of a live wildcard into a backup tree, then removes the
//! directories it emptied. Nothing is ever deleted outright: a file is either
//! still in place or findable under the backup root, at the same relative path.
//!
//! Failures on individual files are logged and recorded in the
//! [`SweepReport`]; they never stop the sweep.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::sidecar::{PREVIEW_INFIX, SIDECAR_EXTENSION, is_image_extension};
use crate::wildcards::WildcardId;

/// Name of the backup directory, created next to the records root
pub const BACKUP_DIR_NAME: &str = "_tmp_bak_";

/// Why a file was moved to the backup tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveReason {
    /// Neither a sidecar nor a recognized image
    NonConformingType,
    /// A sidecar or preview whose wildcard is no longer live
    Stale,
}

impl fmt::Display for ArchiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonConformingType => f.write_str("non-conforming type"),
            Self::Stale => f.write_str("stale"),
        }
    }
}

/// A file relocated by the sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reason: ArchiveReason,
}

/// A file or directory the sweep could not process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepFailure {
    pub path: PathBuf,
    pub operation: &'static str,
    pub message: String,
}

/// Outcome of one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub archived: Vec<ArchivedFile>,
    pub pruned_dirs: Vec<PathBuf>,
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    #[must_use]
    pub fn archived_count(&self) -> usize {
        self.archived.len()
    }

    /// Human-readable summary for the operator
    #[must_use]
    pub fn status_message(&self) -> String {
        let mut message = if self.archived.is_empty() {
            "Cleanup Ran: No stale files found.".to_string()
        } else {
            format!("Cleanup Ran: Archived {} files.", self.archived.len())
        };
        if !self.failures.is_empty() {
            message.push_str(&format!(
                " {} item(s) could not be processed; see log.",
                self.failures.len()
            ));
        }
        message
    }

    fn fail(&mut self, path: &Path, operation: &'static str, error: &io::Error) {
        tracing::warn!(path = %path.display(), operation, error = %error, "sweep step failed");
        self.failures.push(SweepFailure {
            path: path.to_path_buf(),
            operation,
            message: error.to_string(),
        });
    }
}

/// Quarantines files in the records tree that do not belong to a live wildcard
#[derive(Debug, Clone)]
pub struct AssetReconciler {
    records_root: PathBuf,
    backup_root: PathBuf,
    archive_dir: PathBuf,
}

impl AssetReconciler {
    /// Create a reconciler for `records_root`, archiving into `backup_root`.
    ///
    /// Archived files land under `<backup_root>/<records root relative to the
    /// backup root's parent>/`, e.g. `<base>/_tmp_bak_/Prompts/colors/warm.json`.
    pub fn new(records_root: impl Into<PathBuf>, backup_root: impl Into<PathBuf>) -> Self {
        let records_root = records_root.into();
        let backup_root = backup_root.into();

        let label = backup_root
            .parent()
            .and_then(|base| records_root.strip_prefix(base).ok())
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| records_root.file_name().map(PathBuf::from))
            .unwrap_or_default();
        let archive_dir = backup_root.join(label);

        Self {
            records_root,
            backup_root,
            archive_dir,
        }
    }

    #[must_use]
    pub fn records_root(&self) -> &Path {
        &self.records_root
    }

    #[must_use]
    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Directory that mirrors the records root inside the backup tree
    #[must_use]
    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Run both passes of the sweep against the live set.
    ///
    /// An unusable records root yields an empty report.
    pub fn sweep(&self, live: &BTreeSet<WildcardId>) -> SweepReport {
        let mut report = SweepReport::default();

        if !self.records_root.is_dir() {
            tracing::warn!(root = %self.records_root.display(), "records directory is not usable; nothing to sweep");
            return report;
        }

        let live_keys: HashSet<String> = live.iter().map(WildcardId::comparison_key).collect();

        for path in self.files(&mut report) {
            let Some(reason) = self.classify(&path, &live_keys) else {
                continue;
            };
            match self.quarantine(&path) {
                Ok(destination) => {
                    tracing::debug!(file = %path.display(), %reason, "archived");
                    report.archived.push(ArchivedFile {
                        source: path,
                        destination,
                        reason,
                    });
                }
                Err(e) => report.fail(&path, "archive", &e),
            }
        }

        if !report.archived.is_empty() {
            tracing::info!(count = report.archived.len(), "archived non-conforming or stale assets");
        }

        self.prune(&mut report);
        report
    }

    /// Decide whether a file under the records root must be archived.
    ///
    /// `live_keys` holds the upper-cased identifiers of the live set.
    #[must_use]
    pub fn classify(&self, path: &Path, live_keys: &HashSet<String>) -> Option<ArchiveReason> {
        let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
            return Some(ArchiveReason::NonConformingType);
        };
        if ext != SIDECAR_EXTENSION && !is_image_extension(&ext) {
            return Some(ArchiveReason::NonConformingType);
        }

        let key = path
            .strip_prefix(&self.records_root)
            .ok()
            .and_then(base_identifier)
            .map(|id| id.comparison_key());

        match key {
            Some(key) if live_keys.contains(&key) => None,
            _ => Some(ArchiveReason::Stale),
        }
    }

    // Collected up front so moves never race the directory walk.
    fn files(&self, report: &mut SweepReport) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.records_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !entry.path().starts_with(&self.backup_root));

        for entry in walker {
            match entry {
                Ok(entry) if is_sweepable(&entry) => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => {
                    let path = e.path().unwrap_or(self.records_root.as_path()).to_path_buf();
                    report.fail(&path, "walk", &io::Error::from(e));
                }
            }
        }
        files
    }

    fn quarantine(&self, path: &Path) -> io::Result<PathBuf> {
        let relative = path
            .strip_prefix(&self.records_root)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let destination = unique_destination(&self.archive_dir.join(relative));
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        move_file(path, &destination)?;
        Ok(destination)
    }

    // Children are visited before parents, so emptied chains collapse in one pass.
    fn prune(&self, report: &mut SweepReport) {
        let walker = WalkDir::new(&self.records_root)
            .min_depth(1)
            .contents_first(true)
            .into_iter()
            .filter_entry(|entry| !entry.path().starts_with(&self.backup_root));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(self.records_root.as_path()).to_path_buf();
                    report.fail(&path, "walk", &io::Error::from(e));
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            let is_empty = match fs::read_dir(dir) {
                Ok(mut children) => children.next().is_none(),
                Err(e) => {
                    report.fail(dir, "inspect directory", &e);
                    continue;
                }
            };
            if !is_empty {
                continue;
            }
            match fs::remove_dir(dir) {
                Ok(()) => report.pruned_dirs.push(dir.to_path_buf()),
                Err(e) => report.fail(dir, "remove empty directory", &e),
            }
        }
    }
}

// Regular files and symlinks that do not point at a directory. Links are
// moved as links; their targets are never touched.
fn is_sweepable(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

/// Identifier a sidecar or preview path (relative to the records root) belongs to
///
/// Strips the extension and, if present, a trailing `.preview` infix.
#[must_use]
pub fn base_identifier(relative: &Path) -> Option<WildcardId> {
    let stem = relative.with_extension("");
    let name = stem.file_name()?.to_string_lossy().into_owned();
    let trimmed = strip_preview_infix(&name);
    let stem = if trimmed.len() == name.len() || trimmed.is_empty() {
        stem
    } else {
        stem.with_file_name(trimmed)
    };
    WildcardId::from_relative_path(&stem)
}

fn strip_preview_infix(name: &str) -> &str {
    match name.len().checked_sub(PREVIEW_INFIX.len()) {
        Some(cut)
            if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(PREVIEW_INFIX) =>
        {
            &name[..cut]
        }
        _ => name,
    }
}

/// Remove a file, treating an already-missing file as success.
///
/// Returns whether a file was actually removed.
///
/// # Errors
///
/// Propagates every I/O error other than `NotFound`.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(source, destination)?;
            remove_if_exists(source).map(|_| ())
        }
        Err(e) => Err(e),
    }
}

// Earlier archives of the same path are kept: `a.json`, `a.json.1`, ...
fn unique_destination(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let mut n = 1;
    loop {
        let mut candidate = path.as_os_str().to_owned();
        candidate.push(format!(".{n}"));
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
