//! Roots command - print the wildcard directories that will be scanned

use crate::{WildcatError, catalog::CatalogService};

type Result<T> = std::result::Result<T, WildcatError>;

/// Execute the roots command
///
/// # Errors
/// Currently infallible; returns `Result` for consistency with other commands
pub fn execute(catalog: &CatalogService, quiet: bool) -> Result<()> {
    let roots = catalog.roots();

    if roots.is_empty() {
        if !quiet {
            println!("Wildcard directories are not set up yet.");
            println!("Use 'wildcat config set wildcard_dirs=<DIR>' to add one.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Wildcard directories:");
    }
    for root in roots {
        if quiet {
            println!("{}", root.display());
        } else {
            println!("  {}", root.display());
        }
    }
    if !quiet {
        println!("Records directory: {}", catalog.store().root().display());
    }
    Ok(())
}
