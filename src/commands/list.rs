//! List command - refresh the catalog and print every wildcard

use crate::{
    WildcatError,
    catalog::{CatalogEntry, CatalogProvider, SortKey, sort_entries},
    output,
};

type Result<T> = std::result::Result<T, WildcatError>;

/// Execute the list command
///
/// # Errors
/// Returns an error if JSON serialization fails
pub fn execute<P: CatalogProvider>(
    provider: &mut P,
    sort: SortKey,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let entries = sorted_entries(provider, sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !quiet {
            println!("No wildcards found. Check the configured wildcard directories.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Wildcards ({}):", entries.len());
    }
    for entry in &entries {
        println!("{}", output::entry_line(entry, quiet));
    }
    Ok(())
}

/// Refreshed entries ordered by `sort`, ties broken by identifier
pub fn sorted_entries<P: CatalogProvider>(provider: &mut P, sort: SortKey) -> Vec<CatalogEntry> {
    let mut entries = provider.list_entries();
    sort_entries(&mut entries, sort);
    entries
}
