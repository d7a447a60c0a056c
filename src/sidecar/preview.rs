//! Preview image lookup for sidecars

use std::path::{Path, PathBuf};

/// Image extensions recognized as previews
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Optional infix between a sidecar's base name and the image extension
pub const PREVIEW_INFIX: &str = ".preview";

/// Whether `ext` (without the dot) is a recognized image extension
#[must_use]
pub fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Candidate preview files for a sidecar base path, in lookup order
#[must_use]
pub fn preview_candidates(base: &Path) -> Vec<PathBuf> {
    let base = base.as_os_str().to_string_lossy();
    let plain = IMAGE_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("{base}.{ext}")));
    let infixed = IMAGE_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("{base}{PREVIEW_INFIX}.{ext}")));
    plain.chain(infixed).collect()
}

/// Find the preview image for `base`, rejecting anything outside `allowed_root`.
#[must_use]
pub fn find_preview(base: &Path, allowed_root: &Path) -> Option<PathBuf> {
    preview_candidates(base)
        .into_iter()
        .find(|candidate| candidate.is_file())
        .filter(|candidate| {
            let allowed = is_within(candidate, allowed_root);
            if !allowed {
                tracing::warn!(
                    preview = %candidate.display(),
                    root = %allowed_root.display(),
                    "rejecting preview outside the records directory"
                );
            }
            allowed
        })
}

/// Whether `path` resolves to a location inside `root`.
///
/// Both paths are canonicalized so symlinks and `..` cannot escape the root.
#[must_use]
pub fn is_within(path: &Path, root: &Path) -> bool {
    match (path.canonicalize(), root.canonicalize()) {
        (Ok(path), Ok(root)) => path.starts_with(root),
        _ => false,
    }
}
