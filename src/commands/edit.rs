//! Edit command - change a wildcard's metadata

use crate::{
    WildcatError,
    catalog::CatalogProvider,
    sidecar::{RecordEdit, SidecarRecord},
    wildcards::WildcardId,
};

type Result<T> = std::result::Result<T, WildcatError>;

/// Execute the edit command
///
/// # Errors
/// Returns an error if no field was given, the identifier is invalid or not
/// live, or the sidecar cannot be written
pub fn execute<P: CatalogProvider>(
    provider: &mut P,
    wildcard: &str,
    edit: &RecordEdit,
    quiet: bool,
) -> Result<SidecarRecord> {
    if edit.is_empty() {
        return Err(WildcatError::InvalidInput(
            "Nothing to change. Use --description, --activation, --negative or --notes".into(),
        ));
    }

    let id: WildcardId = wildcard.parse()?;
    // Refresh first so a newly added wildcard can be edited right away.
    provider.list_entries();
    let saved = provider.save_record(&id, edit)?;

    if !quiet {
        println!("Updated metadata for {id}");
    }
    Ok(saved)
}
