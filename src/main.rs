//! Wildcat CLI application entry point
//!
//! Browse, annotate and tidy the metadata kept alongside prompt wildcards.
//!
//! # Usage
//!
//! ```bash
//! # Refresh the catalog and list every wildcard (default command)
//! wildcat
//! wildcat list --sort name
//!
//! # Inspect and annotate one wildcard
//! wildcat show colors/warm
//! wildcat edit colors/warm -d "Warm tones" -n "cold, blue"
//!
//! # Move stale sidecars and previews to the backup directory
//! wildcat clean -y
//!
//! # Quiet mode (only output results)
//! wildcat -q list
//! ```
//!
//! # Configuration
//!
//! On first run, wildcat will prompt for initial setup. Configuration is stored in
//! the user's config directory (`~/.config/wildcat/config.toml` on Linux).
//! `WILDCAT_*` environment variables override file values.

use tracing_subscriber::EnvFilter;
use wildcat::{
    WildcatError,
    catalog::CatalogService,
    cli::{Cli, Commands},
    commands,
    config::WildcatConfig,
};

type Result<T> = std::result::Result<T, WildcatError>;

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the configuration named by `--config`, or the default one.
///
/// First-time setup only runs interactively; quiet runs fall back to defaults.
fn load_config(cli: &Cli) -> Result<(WildcatConfig, std::path::PathBuf)> {
    if let Some(path) = &cli.config {
        return Ok((WildcatConfig::load_from(path)?, path.clone()));
    }
    let path = WildcatConfig::config_path()?;
    let config = if cli.quiet {
        WildcatConfig::load()?
    } else {
        WildcatConfig::load_or_setup()?
    };
    Ok((config, path))
}

/// Main entry point for the wildcat application
///
/// Parses command-line arguments, loads configuration, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `WildcatError` if configuration loading fails or any command
/// handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli);

    let command = cli.get_command();

    if let Commands::Completions { shell } = command {
        commands::completions(shell);
        return Ok(());
    }

    let (config, config_path) = load_config(&cli)?;
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &command {
        return commands::config(&config, &config_path, command, quiet);
    }

    let mut catalog = CatalogService::from_config(&config);
    tracing::debug!(
        roots = catalog.roots().len(),
        records = %catalog.store().root().display(),
        "catalog initialised"
    );

    match &command {
        Commands::List { sort, json } => commands::list(&mut catalog, (*sort).into(), *json, quiet)?,
        Commands::Show { wildcard, json } => commands::show(&mut catalog, wildcard, *json)?,
        Commands::Edit { wildcard, .. } => {
            let edit = command.get_record_edit().unwrap_or_default();
            commands::edit(&mut catalog, wildcard, &edit, quiet)?;
        }
        Commands::Clean { yes } => {
            commands::clean(&catalog, *yes, quiet)?;
        }
        Commands::Roots => commands::roots(&catalog, quiet)?,
        Commands::Config { .. } | Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
