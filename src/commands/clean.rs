//! Clean command - quarantine stale and non-conforming assets

use crate::{WildcatError, catalog::CatalogService, output, reconcile::SweepReport};
use dialoguer::Confirm;

type Result<T> = std::result::Result<T, WildcatError>;

/// Execute the clean command
///
/// Asks for confirmation unless `yes` or `quiet` is set. Returns `None` when
/// the operator declines.
///
/// # Errors
/// Returns an error if the confirmation prompt fails
pub fn execute(catalog: &CatalogService, yes: bool, quiet: bool) -> Result<Option<SweepReport>> {
    if !yes && !quiet {
        println!(
            "Stale and non-conforming files under {} will be moved to the backup directory.",
            catalog.store().root().display()
        );
        let confirmed = Confirm::new()
            .with_prompt("Continue?")
            .default(true)
            .interact()
            .map_err(|e| WildcatError::InvalidInput(format!("Confirmation failed: {e}")))?;
        if !confirmed {
            println!("Cleanup cancelled.");
            return Ok(None);
        }
    }

    let report = catalog.clean_stale_assets();

    if !quiet {
        for archived in &report.archived {
            println!("{}", output::archived_line(archived));
        }
        for failure in &report.failures {
            eprintln!(
                "  Failed to {} {}: {}",
                failure.operation,
                failure.path.display(),
                failure.message
            );
        }
        if !report.pruned_dirs.is_empty() {
            println!("Removed {} empty director(ies)", report.pruned_dirs.len());
        }
    }
    println!("{}", output::sweep_status(&report));

    Ok(Some(report))
}
