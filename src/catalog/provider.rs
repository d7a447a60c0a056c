//! Data-provider seam between the catalog and a presentation layer

use super::entry::CatalogEntry;
use super::error::CatalogError;
use crate::sidecar::{RecordEdit, SidecarRecord};
use crate::wildcards::WildcardId;

/// Narrow interface a gallery or editor front end needs from the catalog
///
/// Front ends list entries, read one record for an edit form, and submit
/// the edited fields back. They never touch sidecar files directly.
pub trait CatalogProvider {
    /// Refresh and return every entry in display order.
    fn list_entries(&mut self) -> Vec<CatalogEntry>;

    /// Current record for `id`, if it is in the live set.
    fn get_record(&self, id: &WildcardId) -> Option<SidecarRecord>;

    /// Merge `edit` into the record for `id` and persist it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownWildcard` if `id` is not live and
    /// `CatalogError::Sidecar` if the record cannot be written.
    fn save_record(&mut self, id: &WildcardId, edit: &RecordEdit) -> Result<SidecarRecord, CatalogError>;
}
