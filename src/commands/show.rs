//! Show command - print one wildcard's entry and metadata

use crate::{
    WildcatError,
    catalog::{CatalogEntry, CatalogError, CatalogProvider},
    output,
    wildcards::WildcardId,
};

type Result<T> = std::result::Result<T, WildcatError>;

/// Execute the show command
///
/// # Errors
/// Returns an error if the identifier is invalid or not live, or if JSON
/// serialization fails
pub fn execute<P: CatalogProvider>(provider: &mut P, wildcard: &str, json: bool) -> Result<()> {
    let entry = find_entry(provider, wildcard)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{}", output::entry_details(&entry));
    }
    Ok(())
}

/// Refresh and look up the entry for `wildcard`
///
/// # Errors
/// Returns an error if the identifier is invalid or not in the live set
pub fn find_entry<P: CatalogProvider>(provider: &mut P, wildcard: &str) -> Result<CatalogEntry> {
    let id: WildcardId = wildcard.parse()?;
    provider
        .list_entries()
        .into_iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| CatalogError::UnknownWildcard(id).into())
}
